//! Integration tests for the pattern-table detector

use sniffnmask::sanitization::detector::patterns::PatternRegistry;
use sniffnmask::sanitization::detector::regex::RegexDetector;
use sniffnmask::sanitization::{
    reconstruct, DetectionStatus, EntityDetector, OverlapPolicy, SpanMasker,
};
use std::io::Write;
use tempfile::NamedTempFile;

const NOTE: &str = "Patient Rebecca Adams (SSN 123-45-6789) wrote from rebecca@example.com \
                    via 192.168.10.24 on March 3, 2024.";

#[tokio::test]
async fn test_builtin_table_finds_common_pii() {
    let detector = RegexDetector::new().unwrap();
    let detection = detector.detect(NOTE).await;

    assert_eq!(detection.status, DetectionStatus::Completed);
    let labels: Vec<&str> = detection.spans.iter().map(|s| s.label.as_str()).collect();
    for expected in ["email", "ssn", "ipv4", "date", "name"] {
        assert!(labels.contains(&expected), "missing {expected} in {labels:?}");
    }
    for span in &detection.spans {
        assert!(span.check(NOTE).is_ok(), "span {span:?} is not verbatim");
    }
}

#[tokio::test]
async fn test_regex_detection_masks_and_round_trips() {
    let detector = RegexDetector::new().unwrap();
    let detection = detector.detect(NOTE).await;

    for policy in [OverlapPolicy::LongestMatch, OverlapPolicy::FirstRegistered] {
        let masked = SpanMasker::new(policy).mask(NOTE, detection.spans.clone());

        assert_eq!(masked.sanitized_text.len(), NOTE.len());
        assert!(!masked.sanitized_text.contains("123-45-6789"));
        assert!(!masked.sanitized_text.contains("rebecca@example.com"));
        if masked.entities.iter().all(|e| e.reversible) {
            assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), NOTE);
        }
    }
}

#[tokio::test]
async fn test_custom_table_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[[patterns]]
label = "employee_id"
pattern = 'EMP-\d{6}'
description = "Internal employee numbers"
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let detector = RegexDetector::with_registry(PatternRegistry::from_file(file.path()).unwrap());
    let text = "Badge EMP-004217 and EMP-118822 checked in";
    let detection = detector.detect(text).await;

    assert_eq!(detection.spans.len(), 2);
    let masked = SpanMasker::default().mask(text, detection.spans);
    assert_eq!(masked.entities.len(), 2);
    assert!(masked.entities.iter().all(|e| e.label == "EMPLOYEE_ID"));
    assert_eq!(reconstruct(&masked.sanitized_text, &masked.mapping), text);
}

#[test]
fn test_invalid_table_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[[patterns]]\nlabel = \"bad\"\npattern = '(unclosed'\n")
        .unwrap();
    file.flush().unwrap();

    assert!(PatternRegistry::from_file(file.path()).is_err());
    assert!(PatternRegistry::from_file("/nonexistent/patterns.toml").is_err());
}

#[tokio::test]
async fn test_plain_text_has_no_detections() {
    let detector = RegexDetector::new().unwrap();
    let detection = detector.detect("the weather is mild today").await;

    assert_eq!(detection.status, DetectionStatus::Completed);
    assert!(detection.spans.is_empty());
}
