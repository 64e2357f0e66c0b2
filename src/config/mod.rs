//! Configuration management for SniffNMask.
//!
//! Configuration is read once at process start into an immutable
//! [`SniffConfig`] and passed by reference into the detectors and the
//! engine. Changing it requires a restart.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sniffnmask::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("sniffnmask.toml")?;
//!
//! println!("Model backend: {}", config.llm.base_url);
//! println!("Default method: {}", config.application.default_method);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and default detection method
//! - [`LlmConfig`] - Model backend endpoint, model, timeout, rules file, API key
//! - [`RegexConfig`] - Pattern table location
//! - [`MaskingConfig`] - Overlap resolution policy
//! - [`AuditConfig`] - Audit trail settings
//! - [`LoggingConfig`] - Local log file settings
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! default_method = "llm"
//!
//! [llm]
//! base_url = "http://localhost:11434"
//! model = "llama3.2:latest"
//! timeout_seconds = 60
//! api_key = "${SNIFFNMASK_GATEWAY_TOKEN}"
//!
//! [masking]
//! overlap_policy = "longest_match"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing; an unset
//! variable is a configuration error. Any key can be overridden with
//! `SNIFFNMASK_<SECTION>_<KEY>`, for example `SNIFFNMASK_LLM_MODEL`.
//! `OLLAMA_HOST` and `MODEL_NAME` are also accepted for the model backend.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, AuditConfig, LlmConfig, LoggingConfig, MaskingConfig, RegexConfig,
    SniffConfig,
};
pub use secret::ApiToken;
