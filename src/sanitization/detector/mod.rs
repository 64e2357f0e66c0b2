//! Detector adapters
//!
//! Detectors turn raw text into [`CandidateSpan`]s. Every detector honours the
//! same contract: each emitted span's `text` equals `source[start..end]`.
//! Detectors that only know the matched literal recover offsets with
//! [`CandidateSpan::locate`] and drop what they cannot find.
//!
//! Detection never fails a request. A backend failure is reported as
//! [`DetectionStatus::Failed`] with an empty span list, and masking proceeds.

pub mod llm;
pub mod patterns;
pub mod prompt;
pub mod regex;

use crate::domain::DetectorError;
use crate::sanitization::models::{CandidateSpan, DetectionSummary};
use async_trait::async_trait;

/// Outcome of a detector run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionStatus {
    /// The backend answered; zero spans means nothing was found
    Completed,
    /// The backend failed; spans are empty
    Failed(DetectorError),
}

/// Spans produced by one detector run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub spans: Vec<CandidateSpan>,
    pub status: DetectionStatus,
    /// Reported entities that were skipped: missing fields or text not found
    pub unlocatable: usize,
}

impl Detection {
    /// Successful detection
    pub fn completed(spans: Vec<CandidateSpan>) -> Self {
        Self {
            spans,
            status: DetectionStatus::Completed,
            unlocatable: 0,
        }
    }

    /// Failed detection with no spans
    pub fn failed(error: DetectorError) -> Self {
        Self {
            spans: Vec::new(),
            status: DetectionStatus::Failed(error),
            unlocatable: 0,
        }
    }

    pub fn with_unlocatable(mut self, unlocatable: usize) -> Self {
        self.unlocatable = unlocatable;
        self
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, DetectionStatus::Failed(_))
    }

    /// Summary for the response document
    pub fn summary(&self) -> DetectionSummary {
        let (status, error) = match &self.status {
            DetectionStatus::Completed => ("completed", None),
            DetectionStatus::Failed(e) => ("failed", Some(e.to_string())),
        };
        DetectionSummary {
            status: status.to_string(),
            error,
            candidates: self.spans.len(),
            unlocatable: self.unlocatable,
        }
    }
}

/// A source of candidate spans
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Detect candidate spans in `text`
    async fn detect(&self, text: &str) -> Detection;
}
