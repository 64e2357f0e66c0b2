//! PII detection, masking and reconstruction
//!
//! Raw text flows through a detector, which produces candidate spans. The
//! masker resolves them into a non-overlapping plan and rewrites the text
//! with length-matched placeholders, returning the canonical entities and a
//! placeholder-to-original mapping. [`reconstruct`] reverses the rewrite.
//!
//! ```text
//! text ──► EntityDetector ──► CandidateSpan* ──► SpanMasker ──► MaskedText
//!                                                  │
//!                                       normalize_label + placeholders
//! ```
//!
//! # Examples
//!
//! ```
//! use sniffnmask::sanitization::{mask_text, reconstruct, CandidateSpan};
//!
//! let text = "Write to ana@example.com";
//! let masked = mask_text(text, vec![CandidateSpan::new(9, 24, "email", "ana@example.com")]);
//!
//! assert_eq!(masked.sanitized_text.len(), text.len());
//! assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
//! ```

pub mod audit;
pub mod detector;
pub mod engine;
pub mod highlight;
pub mod masker;
pub mod models;
pub mod normalizer;
pub mod reconstruct;

pub use detector::{Detection, DetectionStatus, EntityDetector};
pub use engine::SanitizationEngine;
pub use masker::{mask_text, OverlapPolicy, SpanMasker};
pub use models::{
    CandidateSpan, CanonicalEntity, DetectionMethod, DummyMapping, MaskedText, SanitizedDocument,
};
pub use normalizer::normalize_label;
pub use reconstruct::reconstruct;
