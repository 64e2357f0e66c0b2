//! Audit logger for masking operations

use crate::domain::{Result, SniffError};
use crate::sanitization::models::{CanonicalEntity, SanitizedDocument};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    request_id: &'a str,
    method: &'a str,
    detection_status: &'a str,
    entities_count: usize,
    dropped_malformed: usize,
    dropped_overlapping: usize,
    processing_time_ms: u64,
    entities: Vec<AuditEntity<'a>>,
}

/// Audit entity entry (with hashed original)
#[derive(Debug, Serialize)]
struct AuditEntity<'a> {
    label: &'a str,
    start: usize,
    end: usize,
    reversible: bool,
    /// SHA-256 hash of original value (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for masking operations
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SniffError::Io(format!(
                    "Failed to create audit log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record one sanitized document
    pub fn log_sanitization(&self, document: &SanitizedDocument) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: document.timestamp.to_rfc3339(),
            request_id: &document.request_id,
            method: document.method.map_or("candidates", |m| m.as_str()),
            detection_status: document
                .detection
                .as_ref()
                .map_or("skipped", |d| d.status.as_str()),
            entities_count: document.entities.len(),
            dropped_malformed: document.dropped.malformed,
            dropped_overlapping: document.dropped.overlapping,
            processing_time_ms: document.processing_time_ms,
            entities: document.entities.iter().map(audit_entity).collect(),
        };

        self.write_entry(&entry)
    }

    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                SniffError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)?;
            writeln!(file, "{json_line}")?;
        } else {
            writeln!(
                file,
                "[{}] Request: {} | Method: {} | Detection: {} | Entities: {} | Dropped: {}/{} | Time: {}ms",
                entry.timestamp,
                entry.request_id,
                entry.method,
                entry.detection_status,
                entry.entities_count,
                entry.dropped_malformed,
                entry.dropped_overlapping,
                entry.processing_time_ms
            )?;
        }

        Ok(())
    }
}

fn audit_entity(entity: &CanonicalEntity) -> AuditEntity<'_> {
    AuditEntity {
        label: &entity.label,
        start: entity.start,
        end: entity.end,
        reversible: entity.reversible,
        value_hash: hash_value(&entity.original_text),
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
