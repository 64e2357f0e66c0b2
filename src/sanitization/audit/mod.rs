//! Audit logging module
//!
//! Provides an append-only audit trail of masking operations. Original
//! values are only ever written as SHA-256 digests.

pub mod logger;

pub use logger::AuditLogger;
