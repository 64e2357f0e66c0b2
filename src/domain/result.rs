//! Result type alias for SniffNMask

use super::errors::SniffError;

/// Result type alias for SniffNMask operations
///
/// # Examples
///
/// ```
/// use sniffnmask::domain::{Result, SniffError};
///
/// fn require_model(model: &str) -> Result<&str> {
///     if model.trim().is_empty() {
///         return Err(SniffError::Configuration("model name is empty".to_string()));
///     }
///     Ok(model)
/// }
///
/// assert!(require_model(" ").is_err());
/// ```
pub type Result<T> = std::result::Result<T, SniffError>;
