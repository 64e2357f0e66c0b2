//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output on stderr, so stdout stays clean for
//!   sanitized text
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Optional JSON file logging with daily or hourly rotation
//!
//! Original PII values are never logged at info level or above; debug
//! events carry labels, offsets and lengths only.
//!
//! # Example
//!
//! ```no_run
//! use sniffnmask::logging::init_logging;
//! use sniffnmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(entities = 3, "Sanitization complete");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
