//! Regex-based detector

use super::{patterns::PatternRegistry, Detection, EntityDetector};
use crate::domain::Result;
use crate::sanitization::models::CandidateSpan;
use async_trait::async_trait;
use std::sync::Arc;

/// Scans text with every pattern of an ordered [`PatternRegistry`]
///
/// Emits one candidate per match, in table order then match order. Matches
/// from different patterns may overlap; the masker resolves them.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl RegexDetector {
    /// Create a new regex detector with the built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Create a new regex detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }

    fn scan(&self, text: &str) -> Vec<CandidateSpan> {
        let mut spans = Vec::new();
        for pattern in self.pattern_registry.all_patterns() {
            for matched in pattern.regex.find_iter(text) {
                if matched.is_empty() {
                    continue;
                }
                spans.push(CandidateSpan::new(
                    matched.start(),
                    matched.end(),
                    pattern.label.as_str(),
                    matched.as_str(),
                ));
            }
        }
        spans
    }
}

#[async_trait]
impl EntityDetector for RegexDetector {
    fn name(&self) -> &'static str {
        "regex"
    }

    async fn detect(&self, text: &str) -> Detection {
        let spans = self.scan(text);
        tracing::debug!(
            detector = self.name(),
            patterns = self.pattern_registry.len(),
            candidates = spans.len(),
            "Regex scan complete"
        );
        Detection::completed(spans)
    }
}
