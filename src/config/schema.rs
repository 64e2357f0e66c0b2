//! Configuration schema types
//!
//! This module defines the configuration structure for SniffNMask.

use crate::config::secret::{deserialize_token, ApiToken};
use crate::sanitization::masker::OverlapPolicy;
use crate::sanitization::models::DetectionMethod;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Main SniffNMask configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SniffConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Model backend settings for the `llm` detector
    #[serde(default)]
    pub llm: LlmConfig,

    /// Pattern table settings for the `regex` detector
    #[serde(default)]
    pub regex: RegexConfig,

    /// Masking behavior
    #[serde(default)]
    pub masking: MaskingConfig,

    /// Audit trail
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SniffConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.llm.validate()?;
        self.regex.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Detector used when a request does not name one
    #[serde(default)]
    pub default_method: DetectionMethod,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_method: DetectionMethod::default(),
        }
    }
}

/// Model backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama-compatible server
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model name passed with every generate request
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Prompt rules file (built-in rules when unset)
    #[serde(default)]
    pub rules_file: Option<PathBuf>,

    /// Bearer token for authenticated gateways; blank means none
    #[serde(default, deserialize_with = "deserialize_token")]
    pub api_key: Option<ApiToken>,
}

impl LlmConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("llm.base_url '{}' is not a valid URL: {}", self.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "llm.base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.model.trim().is_empty() {
            return Err("llm.model cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("llm.timeout_seconds must be > 0".to_string());
        }

        if let Some(ref path) = self.rules_file {
            if !path.exists() {
                return Err(format!("llm.rules_file not found: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Generate endpoint URL
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_seconds: default_llm_timeout_seconds(),
            rules_file: None,
            api_key: None,
        }
    }
}

/// Regex detector configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegexConfig {
    /// Pattern table file (built-in table when unset)
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,
}

impl RegexConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!(
                    "regex.pattern_library not found: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Masking configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaskingConfig {
    /// How overlapping candidate spans are resolved
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

/// Audit trail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_true(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_llm_timeout_seconds() -> u64 {
    60
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/sanitization.log")
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
