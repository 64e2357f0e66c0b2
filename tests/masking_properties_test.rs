//! Integration tests for the masking invariants using synthetic PII

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use sniffnmask::sanitization::{
    mask_text, reconstruct, CandidateSpan, OverlapPolicy, SpanMasker,
};
use std::collections::HashSet;

/// Build a sentence from synthetic values and the exact spans covering them
fn synthetic_document(records: usize) -> (String, Vec<CandidateSpan>) {
    let mut text = String::from("Contact list follows.");
    let mut spans = Vec::new();

    for i in 0..records {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let phone: String = PhoneNumber().fake();

        for (prefix, label, value) in [
            (" Entry: ", "name", name),
            (" mail ", "email", email),
            (" tel ", "phone", phone),
        ] {
            text.push_str(prefix);
            let start = text.len();
            text.push_str(&value);
            spans.push(CandidateSpan::new(start, text.len(), label, value));
        }
        text.push_str(&format!(" (record {i})."));
    }

    (text, spans)
}

#[test]
fn test_length_invariance_with_synthetic_pii() {
    for _ in 0..20 {
        let (text, spans) = synthetic_document(5);
        let masked = mask_text(&text, spans);

        assert_eq!(masked.sanitized_text.len(), text.len());
        for entity in &masked.entities {
            assert_eq!(entity.replacement.len(), entity.original_text.len());
            assert_eq!(
                &masked.sanitized_text[entity.start..entity.end],
                entity.replacement
            );
            assert_eq!(&text[entity.start..entity.end], entity.original_text);
        }
    }
}

#[test]
fn test_round_trip_when_all_entities_reversible() {
    for _ in 0..20 {
        let (text, spans) = synthetic_document(4);
        let masked = mask_text(&text, spans);

        if masked.entities.iter().all(|e| e.reversible) {
            assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
        }
    }
}

/// Expected reconstruction: reversible entities restored, the rest left masked
fn expected_reconstruction(masked: &sniffnmask::sanitization::MaskedText) -> String {
    let mut expected = masked.sanitized_text.clone();
    for entity in masked.entities.iter().filter(|e| e.reversible) {
        expected.replace_range(entity.start..entity.end, &entity.original_text);
    }
    expected
}

#[test]
fn test_reconstruct_restores_exactly_the_reversible_entities() {
    for _ in 0..20 {
        let (text, spans) = synthetic_document(4);
        let masked = mask_text(&text, spans);
        assert_eq!(
            reconstruct(&masked.sanitized_text, &masked.mapping),
            expected_reconstruction(&masked)
        );
    }
}

#[test]
fn test_short_names_never_restore_in_the_wrong_place() {
    let text = "Ed has a banana. Al lives in Alabama. Bo met Ed.";
    let spans: Vec<CandidateSpan> = ["Ed", "Al", "Bo"]
        .iter()
        .flat_map(|name| {
            text.match_indices(*name)
                .filter(|(at, _)| text[at + 2..].starts_with(' ') || text[at + 2..].starts_with('.'))
                .map(|(at, found)| CandidateSpan::new(at, at + 2, "name", found))
                .collect::<Vec<_>>()
        })
        .collect();
    let masked = mask_text(text, spans);

    assert_eq!(masked.sanitized_text.len(), text.len());
    assert_eq!(
        reconstruct(&masked.sanitized_text, &masked.mapping),
        expected_reconstruction(&masked)
    );
    // "na" appears in "banana", so no two-byte name placeholder is restorable
    assert!(masked.entities.iter().all(|e| !e.reversible));
    assert!(masked.mapping.is_empty());
}

#[test]
fn test_counters_unique_per_label() {
    let (text, spans) = synthetic_document(8);
    let masked = mask_text(&text, spans);

    let reversible: Vec<_> = masked.entities.iter().filter(|e| e.reversible).collect();
    let replacements: HashSet<&str> = reversible.iter().map(|e| e.replacement.as_str()).collect();
    assert_eq!(replacements.len(), reversible.len());
    assert_eq!(masked.mapping.len(), reversible.len());

    for entity in &masked.entities {
        assert!(["NAME", "EMAIL", "PHONE"].contains(&entity.label.as_str()));
    }
}

#[test]
fn test_single_phone_number() {
    let text = "Call 415-867-5309 now";
    let masked = mask_text(
        text,
        vec![CandidateSpan::new(5, 17, "phone", "415-867-5309")],
    );

    assert_eq!(masked.sanitized_text, "Call phone_1      now");
    assert_eq!(masked.mapping.len(), 1);
    assert_eq!(masked.mapping.get("phone_1     "), Some("415-867-5309"));
    assert_eq!(masked.entities[0].label, "PHONE");
}

#[test]
fn test_two_emails_get_distinct_counters() {
    let text = "From rebecca.adams@example.com to tom.hanks@example.org";
    let first = "rebecca.adams@example.com";
    let second = "tom.hanks@example.org";
    let first_start = text.find(first).unwrap();
    let second_start = text.find(second).unwrap();

    // Order of the candidate list must not matter
    for candidates in [
        vec![
            CandidateSpan::new(first_start, first_start + first.len(), "email", first),
            CandidateSpan::new(second_start, second_start + second.len(), "EMAIL", second),
        ],
        vec![
            CandidateSpan::new(second_start, second_start + second.len(), "EMAIL", second),
            CandidateSpan::new(first_start, first_start + first.len(), "email", first),
        ],
    ] {
        let masked = mask_text(text, candidates);
        let replacements: Vec<&str> = masked
            .entities
            .iter()
            .map(|e| e.replacement.trim_end())
            .collect();

        assert_eq!(replacements.len(), 2);
        assert!(replacements.contains(&"email_1"));
        assert!(replacements.contains(&"email_2"));
        assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
    }
}

#[test]
fn test_candidate_not_in_source_is_dropped() {
    let text = "Hi, this is Rebecca Adams.";
    let masked = mask_text(
        text,
        vec![
            CandidateSpan::new(12, 25, "name", "Rebecca Adams"),
            CandidateSpan::new(0, 8, "name", "Jonathan"),
        ],
    );

    assert_eq!(masked.entities.len(), 1);
    assert_eq!(masked.dropped.malformed, 1);
    assert!(masked.sanitized_text.starts_with("Hi, this is "));
    assert_eq!(&masked.sanitized_text[12..25], "name_1       ");
}

#[test]
fn test_no_candidates_leaves_text_unchanged() {
    let text = "Nothing to see here, just 3 apples.";
    let masked = mask_text(text, Vec::new());

    assert_eq!(masked.sanitized_text, text);
    assert!(masked.entities.is_empty());
    assert!(masked.mapping.is_empty());
}

#[test]
fn test_overlap_longest_match_policy() {
    let text = "Rebecca Adams called";
    let candidates = vec![
        CandidateSpan::new(0, 7, "name", "Rebecca"),
        CandidateSpan::new(0, 13, "name", "Rebecca Adams"),
    ];

    let masked = SpanMasker::new(OverlapPolicy::LongestMatch).mask(text, candidates);
    assert_eq!(masked.entities.len(), 1);
    assert_eq!(masked.entities[0].original_text, "Rebecca Adams");
    assert_eq!(masked.dropped.overlapping, 1);
    assert_eq!(masked.sanitized_text, "name_1        called");
    assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
}

#[test]
fn test_overlap_first_registered_policy() {
    let text = "Rebecca Adams called";
    let candidates = vec![
        CandidateSpan::new(0, 7, "name", "Rebecca"),
        CandidateSpan::new(0, 13, "name", "Rebecca Adams"),
    ];

    let masked = SpanMasker::new(OverlapPolicy::FirstRegistered).mask(text, candidates);
    assert_eq!(masked.entities.len(), 1);
    assert_eq!(masked.entities[0].original_text, "Rebecca");
    assert_eq!(masked.sanitized_text, "name_1  Adams called");
    assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
}
