//! Sanitization data models

pub mod document;
pub mod entity;

pub use document::{
    DetectionMethod, DetectionSummary, DroppedCandidates, MaskedText, SanitizedDocument,
};
pub use entity::{CandidateSpan, CanonicalEntity, DummyMapping, SpanDefect, Treatment};
