//! Sanitization engine
//!
//! This module provides the [`SanitizationEngine`], the masking entry point.
//! It selects a detector, hands the candidate spans to the
//! [`SpanMasker`], and records the result in the audit trail.
//!
//! # Examples
//!
//! ```no_run
//! use sniffnmask::config::SniffConfig;
//! use sniffnmask::sanitization::{DetectionMethod, SanitizationEngine};
//!
//! # async fn example() -> sniffnmask::domain::Result<()> {
//! let engine = SanitizationEngine::new(&SniffConfig::default())?;
//!
//! let doc = engine
//!     .sanitize("Mail rebecca@example.com", Some(DetectionMethod::Regex))
//!     .await?;
//! println!("{} ({} entities)", doc.sanitized, doc.total_entities());
//! # Ok(())
//! # }
//! ```

use crate::config::SniffConfig;
use crate::domain::{Result, SniffError};
use crate::sanitization::{
    audit::AuditLogger,
    detector::{llm::LlmDetector, patterns::PatternRegistry, regex::RegexDetector, EntityDetector},
    masker::SpanMasker,
    models::{CandidateSpan, DetectionMethod, SanitizedDocument},
};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Masking entry point
///
/// Holds one detector per [`DetectionMethod`]. Requests share no mutable
/// state, so the engine can be wrapped in an `Arc` and used from many tasks.
pub struct SanitizationEngine {
    default_method: DetectionMethod,
    masker: SpanMasker,
    llm: Arc<dyn EntityDetector>,
    regex: Arc<dyn EntityDetector>,
    audit_logger: Option<AuditLogger>,
}

impl SanitizationEngine {
    /// Create a new engine from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The pattern library or rules file cannot be loaded
    /// - The HTTP client cannot be built
    /// - Audit logger initialization fails
    pub fn new(config: &SniffConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            SniffError::Configuration(format!("Invalid sanitization configuration: {e}"))
        })?;

        let regex = match config.regex.pattern_library {
            Some(ref path) => RegexDetector::with_registry(PatternRegistry::from_file(path)?),
            None => RegexDetector::new()?,
        };
        let llm = LlmDetector::new(&config.llm)?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        tracing::debug!(
            default_method = %config.application.default_method,
            model = llm.model(),
            patterns = regex.registry().len(),
            labels = ?regex.registry().labels(),
            overlap_policy = %config.masking.overlap_policy,
            audit_log = ?audit_logger.as_ref().map(AuditLogger::log_path),
            "Sanitization engine initialized"
        );

        Ok(Self {
            default_method: config.application.default_method,
            masker: SpanMasker::new(config.masking.overlap_policy),
            llm: Arc::new(llm),
            regex: Arc::new(regex),
            audit_logger,
        })
    }

    /// Replace the detector used for `method`
    pub fn with_detector(mut self, method: DetectionMethod, detector: Arc<dyn EntityDetector>) -> Self {
        match method {
            DetectionMethod::Llm => self.llm = detector,
            DetectionMethod::Regex => self.regex = detector,
        }
        self
    }

    pub fn default_method(&self) -> DetectionMethod {
        self.default_method
    }

    fn detector(&self, method: DetectionMethod) -> &dyn EntityDetector {
        match method {
            DetectionMethod::Llm => self.llm.as_ref(),
            DetectionMethod::Regex => self.regex.as_ref(),
        }
    }

    /// Detect and mask PII in `text`
    ///
    /// `method` falls back to the configured default. A detector failure is
    /// not an error: the document carries a failed detection summary and the
    /// text is returned unmasked.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the audit entry fails.
    pub async fn sanitize(
        &self,
        text: &str,
        method: Option<DetectionMethod>,
    ) -> Result<SanitizedDocument> {
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let method = method.unwrap_or(self.default_method);
        let detector = self.detector(method);

        let detection = detector.detect(text).await;
        if detection.is_failed() {
            tracing::warn!(
                request_id = %request_id,
                detector = detector.name(),
                "Detection failed, returning text without masking"
            );
        }

        let summary = detection.summary();
        let masked = self.masker.mask(text, detection.spans);
        let document = SanitizedDocument::new(
            request_id,
            Some(method),
            text.to_string(),
            masked,
            Some(summary),
            elapsed_ms(start),
        );

        self.finish(document)
    }

    /// Mask caller-supplied candidate spans without running a detector
    ///
    /// # Errors
    ///
    /// Returns an error only if writing the audit entry fails.
    pub fn mask_candidates(
        &self,
        text: &str,
        candidates: Vec<CandidateSpan>,
    ) -> Result<SanitizedDocument> {
        let start = Instant::now();
        let masked = self.masker.mask(text, candidates);
        let document = SanitizedDocument::new(
            Uuid::new_v4().to_string(),
            None,
            text.to_string(),
            masked,
            None,
            elapsed_ms(start),
        );

        self.finish(document)
    }

    fn finish(&self, document: SanitizedDocument) -> Result<SanitizedDocument> {
        tracing::info!(
            request_id = %document.request_id,
            method = document.method.map_or("candidates", |m| m.as_str()),
            entities = document.total_entities(),
            dropped_malformed = document.dropped.malformed,
            dropped_overlapping = document.dropped.overlapping,
            detection_failed = document.detection_failed(),
            duration_ms = document.processing_time_ms,
            "Sanitization complete"
        );

        if let Some(ref logger) = self.audit_logger {
            if let Err(e) = logger.log_sanitization(&document) {
                tracing::error!(
                    error = ?e,
                    request_id = %document.request_id,
                    "Failed to write audit entry"
                );
                return Err(e);
            }
        }

        Ok(document)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
