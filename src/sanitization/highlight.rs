//! Highlight ranges for presenting sanitized text
//!
//! Presentation only. Ranges are derived from the masker's entities and
//! index the sanitized text.

use crate::sanitization::models::CanonicalEntity;
use std::ops::Range;

/// Byte ranges of every masked entity in the sanitized text, in document order
///
/// Ranges that are out of bounds for `text` or overlap an earlier range are
/// skipped so the result is always safe to slice.
pub fn highlight_spans(text: &str, entities: &[CanonicalEntity]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = entities
        .iter()
        .map(|e| e.start..e.start + e.replacement.len())
        .collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut last_end = 0;
    ranges.retain(|r| {
        let usable = r.start >= last_end
            && r.start < r.end
            && r.end <= text.len()
            && text.is_char_boundary(r.start)
            && text.is_char_boundary(r.end);
        if usable {
            last_end = r.end;
        }
        usable
    });
    ranges
}

/// Wrap every highlighted range of `text` in `open`/`close` markers
///
/// ```
/// use sniffnmask::sanitization::highlight::render_marked;
///
/// assert_eq!(render_marked("Hi name_1!", &[3..9], "[", "]"), "Hi [name_1]!");
/// ```
pub fn render_marked(text: &str, ranges: &[Range<usize>], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut last = 0;
    for range in ranges {
        if range.start < last || range.end > text.len() {
            continue;
        }
        out.push_str(&text[last..range.start]);
        out.push_str(open);
        out.push_str(&text[range.clone()]);
        out.push_str(close);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}
