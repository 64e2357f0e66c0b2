//! Masking results and request-level documents

use super::entity::{CanonicalEntity, DummyMapping};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Detection backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Local model prompt pipeline
    #[default]
    Llm,
    /// Regex rule table
    Regex,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llm" => Ok(Self::Llm),
            "regex" => Ok(Self::Regex),
            _ => Err(format!("Invalid detection method '{s}'. Must be one of: llm, regex")),
        }
    }
}

/// Candidates discarded by the masker before rewriting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedCandidates {
    /// Out of bounds, empty, split characters, or not verbatim
    pub malformed: usize,
    /// Lost overlap resolution to another candidate
    pub overlapping: usize,
}

/// Output of one masking pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedText {
    /// Sanitized text, same byte length as the input
    pub sanitized_text: String,
    /// Entities in processing (right-to-left) order
    pub entities: Vec<CanonicalEntity>,
    /// Placeholder to original value
    pub mapping: DummyMapping,
    /// Candidates that were not masked
    pub dropped: DroppedCandidates,
}

impl MaskedText {
    /// Entities sorted by document position
    pub fn entities_in_document_order(&self) -> Vec<&CanonicalEntity> {
        let mut ordered: Vec<&CanonicalEntity> = self.entities.iter().collect();
        ordered.sort_by_key(|e| e.start);
        ordered
    }
}

/// Outcome of the detection step as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    /// `completed` or `failed`
    pub status: String,
    /// Failure reason if the detector backend failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Candidate spans produced by the detector
    pub candidates: usize,
    /// Reported entities whose text could not be located in the source
    pub unlocatable: usize,
}

/// Sanitization result for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizedDocument {
    /// Per-request identifier, used in logs and the audit trail
    pub request_id: String,
    /// Detector used, `None` when the caller supplied candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<DetectionMethod>,
    pub original: String,
    pub sanitized: String,
    pub entities: Vec<CanonicalEntity>,
    pub mapping: DummyMapping,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<DetectionSummary>,
    pub dropped: DroppedCandidates,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
    /// Masked entity count per canonical label
    pub stats_by_label: BTreeMap<String, usize>,
}

impl SanitizedDocument {
    pub fn new(
        request_id: String,
        method: Option<DetectionMethod>,
        original: String,
        masked: MaskedText,
        detection: Option<DetectionSummary>,
        processing_time_ms: u64,
    ) -> Self {
        let mut stats_by_label = BTreeMap::new();
        for entity in &masked.entities {
            *stats_by_label.entry(entity.label.clone()).or_insert(0) += 1;
        }

        Self {
            request_id,
            method,
            original,
            sanitized: masked.sanitized_text,
            entities: masked.entities,
            mapping: masked.mapping,
            detection,
            dropped: masked.dropped,
            processing_time_ms,
            timestamp: Utc::now(),
            stats_by_label,
        }
    }

    /// Get total number of masked entities
    pub fn total_entities(&self) -> usize {
        self.entities.len()
    }

    /// Check if anything was masked
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Whether the detector backend failed for this request
    pub fn detection_failed(&self) -> bool {
        self.detection
            .as_ref()
            .is_some_and(|d| d.status == "failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_method_parse() {
        assert_eq!("llm".parse::<DetectionMethod>().unwrap(), DetectionMethod::Llm);
        assert_eq!("REGEX".parse::<DetectionMethod>().unwrap(), DetectionMethod::Regex);
        assert!("ner".parse::<DetectionMethod>().is_err());
    }

    #[test]
    fn test_detection_method_serde() {
        let json = serde_json::to_string(&DetectionMethod::Regex).unwrap();
        assert_eq!(json, "\"regex\"");
    }

    #[test]
    fn test_document_stats() {
        let masked = MaskedText {
            sanitized_text: "email_2 email_1".to_string(),
            entities: vec![
                CanonicalEntity {
                    start: 8,
                    end: 15,
                    original_text: "b@x.org".to_string(),
                    label: "EMAIL".to_string(),
                    replacement: "email_1".to_string(),
                    reversible: true,
                },
                CanonicalEntity {
                    start: 0,
                    end: 7,
                    original_text: "a@x.org".to_string(),
                    label: "EMAIL".to_string(),
                    replacement: "email_2".to_string(),
                    reversible: true,
                },
            ],
            mapping: DummyMapping::new(),
            dropped: DroppedCandidates::default(),
        };

        let ordered = masked.entities_in_document_order();
        assert_eq!(ordered[0].start, 0);

        let doc = SanitizedDocument::new(
            "req-1".to_string(),
            Some(DetectionMethod::Regex),
            "a@x.org b@x.org".to_string(),
            masked,
            None,
            3,
        );
        assert_eq!(doc.total_entities(), 2);
        assert_eq!(doc.stats_by_label.get("EMAIL"), Some(&2));
        assert!(!doc.detection_failed());
    }
}
