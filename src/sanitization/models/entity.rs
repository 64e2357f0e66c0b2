//! Span and entity data models

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use thiserror::Error;

/// Intended treatment of a detected span
///
/// Only masking is supported today. Unknown treatments coming from a
/// detector (for example a model answering `"masked"`) fall back to
/// [`Treatment::Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Treatment {
    /// Replace the span with a reversible placeholder
    #[default]
    #[serde(other)]
    Mask,
}

/// Reason a candidate span cannot be masked safely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpanDefect {
    #[error("span is empty")]
    Empty,
    #[error("span exceeds text length")]
    OutOfBounds,
    #[error("span offsets are not on character boundaries")]
    NotCharBoundary,
    #[error("span text does not match the source verbatim")]
    NotVerbatim,
}

/// A detector's claim that `text[start..end]` is PII of type `label`
///
/// Offsets are byte offsets into the UTF-8 source text, half-open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSpan {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Detector-specific label, case-insensitive
    #[serde(alias = "entity", alias = "type")]
    pub label: String,
    /// Verbatim source substring
    pub text: String,
    /// Intended treatment
    #[serde(default)]
    pub category: Treatment,
}

impl CandidateSpan {
    /// Create a candidate span from known offsets
    pub fn new(start: usize, end: usize, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            text: text.into(),
            category: Treatment::Mask,
        }
    }

    /// Build a candidate for a detector that only knows the matched literal
    ///
    /// Offsets come from the first occurrence of `text` in `source`.
    /// Returns `None` when the literal is empty or cannot be found.
    pub fn locate(source: &str, label: impl Into<String>, text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let start = source.find(text)?;
        Some(Self::new(start, start + text.len(), label, text))
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the verbatim contract against the source text
    pub fn check(&self, source: &str) -> Result<(), SpanDefect> {
        if self.start >= self.end {
            return Err(SpanDefect::Empty);
        }
        if self.end > source.len() {
            return Err(SpanDefect::OutOfBounds);
        }
        if !source.is_char_boundary(self.start) || !source.is_char_boundary(self.end) {
            return Err(SpanDefect::NotCharBoundary);
        }
        if source[self.start..self.end] != self.text {
            return Err(SpanDefect::NotVerbatim);
        }
        Ok(())
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &CandidateSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The masker's normalized record of one masked span
///
/// `start`/`end` index the sanitized text. Masking is length preserving, so
/// the same offsets also locate `original_text` in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEntity {
    pub start: usize,
    pub end: usize,
    /// Verbatim original substring
    #[serde(alias = "text")]
    pub original_text: String,
    /// Canonical uppercase label
    #[serde(alias = "entity")]
    pub label: String,
    /// Exact string substituted at `start..end`
    pub replacement: String,
    /// False when the placeholder collided and the entity is absent from the mapping
    #[serde(default = "default_reversible")]
    pub reversible: bool,
}

fn default_reversible() -> bool {
    true
}

/// Placeholder to original value table used for reconstruction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DummyMapping(BTreeMap<String, String>);

impl DummyMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, refusing to overwrite an existing placeholder
    ///
    /// Returns `false` if the placeholder was already present.
    pub fn insert(&mut self, placeholder: String, original: String) -> bool {
        match self.0.entry(placeholder) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(original);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Remove a placeholder, returning its original if present
    pub fn remove(&mut self, placeholder: &str) -> Option<String> {
        self.0.remove(placeholder)
    }

    pub fn contains(&self, placeholder: &str) -> bool {
        self.0.contains_key(placeholder)
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.0.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for DummyMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
