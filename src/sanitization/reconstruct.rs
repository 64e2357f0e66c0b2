//! Reconstruction of original text from a sanitized text and its mapping

use crate::sanitization::models::DummyMapping;
use regex::Regex;
use std::borrow::Cow;

/// Restore original values in `sanitized` using `mapping`
///
/// All placeholders are replaced in one left-to-right scan, longest
/// placeholder first at each position. A restored value is never scanned
/// again, so an original that happens to contain placeholder-like text is
/// left intact.
///
/// # Examples
///
/// ```
/// use sniffnmask::sanitization::models::DummyMapping;
/// use sniffnmask::sanitization::reconstruct::reconstruct;
///
/// let mapping: DummyMapping = [("phone_1     ".to_string(), "415-867-5309".to_string())]
///     .into_iter()
///     .collect();
///
/// assert_eq!(
///     reconstruct("Call phone_1      now", &mapping),
///     "Call 415-867-5309 now"
/// );
/// ```
pub fn reconstruct(sanitized: &str, mapping: &DummyMapping) -> String {
    if mapping.is_empty() {
        return sanitized.to_string();
    }

    let mut placeholders: Vec<&str> = mapping
        .iter()
        .map(|(placeholder, _)| placeholder)
        .filter(|p| !p.is_empty())
        .collect();
    placeholders.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = placeholders
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&alternation) {
        Ok(re) => re
            .replace_all(sanitized, |caps: &regex::Captures<'_>| {
                mapping.get(&caps[0]).unwrap_or(&caps[0]).to_string()
            })
            .into_owned(),
        Err(e) => {
            tracing::warn!(
                error = %e,
                placeholders = placeholders.len(),
                "Placeholder pattern too large, falling back to sequential replacement"
            );
            sequential(sanitized, &placeholders, mapping).into_owned()
        }
    }
}

fn sequential<'a>(sanitized: &'a str, placeholders: &[&str], mapping: &DummyMapping) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(sanitized);
    for placeholder in placeholders {
        if let Some(original) = mapping.get(placeholder) {
            if text.contains(placeholder) {
                text = Cow::Owned(text.replace(placeholder, original));
            }
        }
    }
    text
}
