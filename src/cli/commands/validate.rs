//! Validate config command implementation
//!
//! Loads the configuration and builds both detectors, so a bad pattern
//! table or rules file is reported here rather than on first use.

use crate::cli::Cli;
use crate::sanitization::SanitizationEngine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        let source = cli
            .config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        tracing::info!(config = %source, "Validating configuration");

        println!("🔍 Validating configuration: {source}");
        println!();

        let config = match cli.load_config() {
            Ok(c) => {
                println!("✅ Configuration loaded and valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = SanitizationEngine::new(&config) {
            println!("❌ Failed to build detectors");
            println!("   Error: {e}");
            return Ok(2);
        }
        println!("✅ Detectors built");

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Default Method: {}", config.application.default_method);
        println!("  Model Backend: {}", config.llm.base_url);
        println!("  Model: {}", config.llm.model);
        println!("  Timeout: {}s", config.llm.timeout_seconds);
        println!(
            "  Rules: {}",
            config
                .llm
                .rules_file
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
        );
        println!(
            "  API Key: {}",
            config
                .llm
                .api_key
                .as_ref()
                .map_or_else(|| "not set".to_string(), |t| format!("set ({})", t.fingerprint()))
        );
        println!(
            "  Pattern Library: {}",
            config
                .regex
                .pattern_library
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
        );
        println!("  Overlap Policy: {}", config.masking.overlap_policy);
        println!(
            "  Audit: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_reports_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[llm]\ntimeout_seconds = 0\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["sniffnmask", "--config", &path, "validate-config"]);
        assert_eq!(ValidateArgs {}.execute(&cli).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_validate_accepts_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[application]\ndefault_method = \"regex\"\n").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["sniffnmask", "--config", &path, "validate-config"]);
        assert_eq!(ValidateArgs {}.execute(&cli).await.unwrap(), 0);
    }
}
