//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "sniffnmask.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing SniffNMask configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Start the model server (e.g. `ollama serve`) and pull the model");
                println!("  3. Validate configuration: sniffnmask validate-config");
                println!("  4. Sanitize a file: sniffnmask sanitize notes.txt --format text");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# SniffNMask Configuration File

[application]
log_level = "info"
default_method = "llm"  # llm | regex

[llm]
base_url = "http://localhost:11434"
model = "llama3.2:latest"
timeout_seconds = 60

[masking]
overlap_policy = "longest_match"  # longest_match | first_registered
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# SniffNMask Configuration File
#
# Every key is optional; the values below are the defaults unless noted.
# Any key can be overridden with SNIFFNMASK_<SECTION>_<KEY>, for example
# SNIFFNMASK_LLM_MODEL. ${VAR} placeholders are replaced from the
# environment (and .env) before parsing.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# Detector used when a request does not name one: "llm" or "regex"
default_method = "llm"

# ============================================================================
# Model Backend (llm detector)
# ============================================================================
[llm]
# Ollama-compatible server; OLLAMA_HOST is also honoured
base_url = "http://localhost:11434"

# Model name; MODEL_NAME is also honoured
model = "llama3.2:latest"

# Request timeout. On timeout the request continues with no detections.
timeout_seconds = 60

# Prompt instruction rules (built-in rules when unset)
# rules_file = "./rules/sanitization_rules.toml"

# Bearer token for an authenticating gateway (use an environment variable)
# api_key = "${SNIFFNMASK_GATEWAY_TOKEN}"

# ============================================================================
# Pattern Table (regex detector)
# ============================================================================
[regex]
# Ordered [[patterns]] table (built-in table when unset)
# pattern_library = "./patterns/pii_patterns.toml"

# ============================================================================
# Masking
# ============================================================================
[masking]
# How overlapping candidate spans are resolved:
# - longest_match: the longer span wins, ties go to the earlier start
# - first_registered: the earlier candidate (pattern table order) wins
overlap_policy = "longest_match"

# ============================================================================
# Audit Trail
# ============================================================================
[audit]
# Record every masking operation; originals are stored as SHA-256 hashes
enabled = false
log_path = "./audit/sanitization.log"
json_format = true

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
