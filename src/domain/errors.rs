//! Domain error types
//!
//! This module defines the error hierarchy for SniffNMask.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main SniffNMask error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum SniffError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Detector adapter errors
    #[error("Detection error: {0}")]
    Detection(#[from] DetectorError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Detector-specific errors
///
/// Raised by detector adapters while talking to their backend. These never
/// abort a masking request; they are carried inside a failed detection so
/// callers can distinguish "nothing found" from "detection failed".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    /// Failed to reach the model backend
    #[error("Failed to connect to model backend: {0}")]
    ConnectionFailed(String),

    /// Backend did not answer within the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (non-2xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Response envelope could not be read
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Response text did not contain a parseable entity array
    #[error("Malformed entity list: {0}")]
    MalformedEntities(String),

    /// Detector could not be constructed
    #[error("Failed to build detector: {0}")]
    Build(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for SniffError {
    fn from(err: std::io::Error) -> Self {
        SniffError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SniffError {
    fn from(err: serde_json::Error) -> Self {
        SniffError::Serialization(err.to_string())
    }
}
