// SniffNMask - Reversible PII Masking
// Copyright (c) 2025 SniffNMask Contributors
// Licensed under the MIT License

//! # SniffNMask - Reversible PII Masking
//!
//! SniffNMask detects personally identifiable information in free text,
//! replaces each occurrence with a length-matched placeholder, and returns a
//! mapping that restores the original text exactly.
//!
//! ## Overview
//!
//! - **Detecting** PII with a local model server or an ordered regex table
//! - **Normalizing** detector labels onto one uppercase vocabulary
//! - **Masking** with conflict-free, length-preserving placeholders
//! - **Reconstructing** the original text from the sanitized text and mapping
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`sanitization`] - Detectors, masker, reconstruction, audit trail
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sniffnmask::config::load_config;
//! use sniffnmask::sanitization::{reconstruct, DetectionMethod, SanitizationEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("sniffnmask.toml")?;
//!     let engine = SanitizationEngine::new(&config)?;
//!
//!     let doc = engine
//!         .sanitize("Call Rebecca at 415-867-5309", Some(DetectionMethod::Regex))
//!         .await?;
//!     println!("{}", doc.sanitized);
//!
//!     assert_eq!(reconstruct(&doc.sanitized, &doc.mapping), doc.original);
//!     Ok(())
//! }
//! ```
//!
//! ## Masking Guarantees
//!
//! - The sanitized text has the same byte length as the input
//! - Placeholders are `{label}_{n}`, counted per label, space padded or
//!   truncated to the span width
//! - Overlapping candidates are resolved before rewriting
//! - A mapping entry is never overwritten; a colliding placeholder is still
//!   masked but flagged as not reversible
//! - A placeholder that also occurs elsewhere in the output loses its mapping
//!   entry, so reconstruction restores exactly the reversible entities
//!
//! ## Error Handling
//!
//! Library operations return [`domain::SniffError`]. Detector backend
//! failures are not errors: they are reported in the detection summary and
//! masking proceeds with no detections.
//!
//! ## Logging
//!
//! SniffNMask uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(entities = 3, "Sanitization complete");
//! warn!(model = "llama3.2:latest", "Model backend request failed");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod sanitization;
