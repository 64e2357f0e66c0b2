//! Span masker
//!
//! Turns an unordered list of candidate spans into one consistent sanitized
//! text, a list of canonical entities and a reversible placeholder mapping.
//!
//! # Pipeline
//!
//! 1. Candidates that break the verbatim contract are dropped as malformed.
//! 2. Overlaps are resolved into a [`ReplacementPlan`] under the configured
//!    [`OverlapPolicy`].
//! 3. Placeholders are assigned right to left (reverse document order), one
//!    counter per canonical label, and fitted to the span's byte width.
//! 4. The output is built in a single left-to-right pass over the source.
//! 5. A placeholder that also occurs anywhere else in the output would be
//!    restored in the wrong place, so its entity loses its mapping entry and
//!    is marked not reversible.
//!
//! Every replacement has the width of the span it replaces, so the sanitized
//! text has the same byte length as the input and entity offsets are valid
//! in both.
//!
//! # Examples
//!
//! ```
//! use sniffnmask::sanitization::masker::SpanMasker;
//! use sniffnmask::sanitization::models::CandidateSpan;
//!
//! let text = "Call 415-867-5309 now";
//! let masked = SpanMasker::default().mask(
//!     text,
//!     vec![CandidateSpan::new(5, 17, "phone", "415-867-5309")],
//! );
//!
//! assert_eq!(masked.sanitized_text, "Call phone_1      now");
//! assert_eq!(masked.mapping.get("phone_1     "), Some("415-867-5309"));
//! ```

pub mod placeholder;
pub mod plan;

pub use placeholder::{fit_to_width, PlaceholderCounters};
pub use plan::{OverlapPolicy, ReplacementPlan};

use crate::sanitization::models::{
    CandidateSpan, CanonicalEntity, DroppedCandidates, DummyMapping, MaskedText,
};
use crate::sanitization::normalizer::normalize_label;

/// Length-preserving, reversible span masker
///
/// Holds no state between calls; counters and mappings are local to each
/// [`mask`](Self::mask) invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanMasker {
    policy: OverlapPolicy,
}

impl SpanMasker {
    /// Create a masker with the given overlap policy
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    /// Overlap policy in use
    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Mask `candidates` in `text`
    ///
    /// Never fails: unusable candidates are counted in
    /// [`MaskedText::dropped`] and otherwise ignored.
    pub fn mask(&self, text: &str, candidates: Vec<CandidateSpan>) -> MaskedText {
        let total = candidates.len();
        let mut malformed = 0;
        let valid: Vec<CandidateSpan> = candidates
            .into_iter()
            .filter(|span| match span.check(text) {
                Ok(()) => true,
                Err(defect) => {
                    tracing::debug!(
                        start = span.start,
                        end = span.end,
                        label = %span.label,
                        reason = %defect,
                        "Dropping malformed candidate"
                    );
                    malformed += 1;
                    false
                }
            })
            .collect();

        let (plan, overlapping) = ReplacementPlan::resolve(valid, self.policy);

        let mut counters = PlaceholderCounters::new();
        let mut mapping = DummyMapping::new();
        let mut entities = Vec::with_capacity(plan.len());

        for span in plan.spans().iter().rev() {
            let label = normalize_label(&span.label);
            let replacement = fit_to_width(&counters.next(&label), span.len());
            let reversible = mapping.insert(replacement.clone(), span.text.clone());

            if !reversible {
                tracing::warn!(
                    start = span.start,
                    end = span.end,
                    label = %label,
                    width = span.len(),
                    "Placeholder collision, entity masked without a reverse mapping"
                );
            }

            entities.push(CanonicalEntity {
                start: span.start,
                end: span.start + replacement.len(),
                original_text: span.text.clone(),
                label,
                replacement,
                reversible,
            });
        }

        let mut sanitized_text = String::with_capacity(text.len());
        let mut cursor = 0;
        for entity in entities.iter().rev() {
            sanitized_text.push_str(&text[cursor..entity.start]);
            sanitized_text.push_str(&entity.replacement);
            cursor = entity.end;
        }
        sanitized_text.push_str(&text[cursor..]);

        for entity in entities.iter_mut().filter(|e| e.reversible) {
            if occurs_elsewhere(&sanitized_text, &entity.replacement, entity.start) {
                tracing::warn!(
                    start = entity.start,
                    end = entity.end,
                    label = %entity.label,
                    "Placeholder also occurs outside its span, dropping reverse mapping"
                );
                mapping.remove(&entity.replacement);
                entity.reversible = false;
            }
        }

        tracing::debug!(
            candidates = total,
            masked = entities.len(),
            malformed = malformed,
            overlapping = overlapping,
            policy = %self.policy,
            "Masking pass complete"
        );

        MaskedText {
            sanitized_text,
            entities,
            mapping,
            dropped: DroppedCandidates {
                malformed,
                overlapping,
            },
        }
    }
}

/// True if `needle` starts anywhere in `haystack` other than `own_start`
///
/// Overlapping occurrences count.
fn occurs_elsewhere(haystack: &str, needle: &str, own_start: usize) -> bool {
    if needle.is_empty() {
        return false;
    }
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let at = from + offset;
        if at != own_start {
            return true;
        }
        from = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Mask with the default overlap policy
pub fn mask_text(text: &str, candidates: Vec<CandidateSpan>) -> MaskedText {
    SpanMasker::default().mask(text, candidates)
}
