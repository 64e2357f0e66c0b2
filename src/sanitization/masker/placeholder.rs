//! Placeholder generation and width fitting

use std::collections::HashMap;

/// Per-label placeholder counters for one masking pass
///
/// Each label starts at 1 and increments per entity in the order
/// [`next`](Self::next) is called.
#[derive(Debug, Default)]
pub struct PlaceholderCounters {
    counters: HashMap<String, usize>,
}

impl PlaceholderCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next raw placeholder (`{label_lowercase}_{n}`) for a label
    pub fn next(&mut self, canonical_label: &str) -> String {
        let counter = self.counters.entry(canonical_label.to_string()).or_insert(0);
        *counter += 1;
        format!("{}_{}", canonical_label.to_lowercase(), counter)
    }
}

/// Fit a placeholder to exactly `width` bytes
///
/// Shorter placeholders are right-padded with spaces. Longer ones are cut at
/// the last character boundary that fits and then padded, so the result is
/// always valid UTF-8 of exactly `width` bytes.
pub fn fit_to_width(placeholder: &str, width: usize) -> String {
    let mut cut = placeholder.len().min(width);
    while !placeholder.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut fitted = String::with_capacity(width);
    fitted.push_str(&placeholder[..cut]);
    fitted.extend(std::iter::repeat(' ').take(width - cut));
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_per_label() {
        let mut counters = PlaceholderCounters::new();
        assert_eq!(counters.next("EMAIL"), "email_1");
        assert_eq!(counters.next("PHONE"), "phone_1");
        assert_eq!(counters.next("EMAIL"), "email_2");
        assert_eq!(counters.next("CREDIT_CARD"), "credit_card_1");
    }

    #[test]
    fn test_fit_pads_short_placeholder() {
        assert_eq!(fit_to_width("phone_1", 12), "phone_1     ");
    }

    #[test]
    fn test_fit_truncates_long_placeholder() {
        assert_eq!(fit_to_width("credit_card_1", 4), "cred");
        assert_eq!(fit_to_width("email_1", 7), "email_1");
    }

    #[test]
    fn test_fit_respects_char_boundaries() {
        // "é" is two bytes; a 2-byte budget cannot hold "né" (3 bytes)
        let fitted = fit_to_width("né_1", 2);
        assert_eq!(fitted, "n ");
        assert_eq!(fitted.len(), 2);
    }
}
