//! Overlap resolution and the non-overlapping replacement plan

use crate::sanitization::models::CandidateSpan;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which candidate wins when two spans overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Longer span wins; ties go to the earlier start, then the earlier candidate
    #[default]
    LongestMatch,
    /// Earlier candidate in the input list wins (rule-table order for regex)
    FirstRegistered,
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LongestMatch => f.write_str("longest_match"),
            Self::FirstRegistered => f.write_str("first_registered"),
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "longest_match" => Ok(Self::LongestMatch),
            "first_registered" => Ok(Self::FirstRegistered),
            _ => Err(format!(
                "Invalid overlap policy '{s}'. Must be one of: longest_match, first_registered"
            )),
        }
    }
}

/// Conflict-free set of spans, sorted by start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementPlan {
    spans: Vec<CandidateSpan>,
}

impl ReplacementPlan {
    /// Resolve overlapping candidates under `policy`
    ///
    /// Candidates are assumed to be individually valid against the source.
    /// Returns the plan and the number of candidates dropped for overlapping
    /// a winner (exact duplicates included).
    pub fn resolve(candidates: Vec<CandidateSpan>, policy: OverlapPolicy) -> (Self, usize) {
        let mut order: Vec<usize> = (0..candidates.len()).collect();
        match policy {
            OverlapPolicy::LongestMatch => {
                order.sort_by_key(|&i| (Reverse(candidates[i].len()), candidates[i].start, i));
            }
            OverlapPolicy::FirstRegistered => {}
        }

        // start -> end of accepted spans; disjoint by construction
        let mut accepted: BTreeMap<usize, usize> = BTreeMap::new();
        let mut keep = vec![false; candidates.len()];
        let mut dropped = 0;

        for i in order {
            let span = &candidates[i];
            let conflict = accepted
                .range(..span.end)
                .next_back()
                .is_some_and(|(_, &end)| end > span.start);

            if conflict {
                tracing::debug!(
                    start = span.start,
                    end = span.end,
                    label = %span.label,
                    "Dropping overlapping candidate"
                );
                dropped += 1;
            } else {
                accepted.insert(span.start, span.end);
                keep[i] = true;
            }
        }

        let mut spans: Vec<CandidateSpan> = candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(span, kept)| kept.then_some(span))
            .collect();
        spans.sort_by_key(|s| s.start);

        (Self { spans }, dropped)
    }

    /// Spans in document order
    pub fn spans(&self) -> &[CandidateSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
