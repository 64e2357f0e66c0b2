//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for SniffNMask using clap.
//!
//! Exit codes: 0 success, 1 completed with a failed detection (text left
//! unmasked), 2 configuration error, 5 fatal error.

pub mod commands;

use crate::config::{load_config_or_default, SniffConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sniffnmask.toml";

/// SniffNMask - reversible PII masking
#[derive(Parser, Debug)]
#[command(name = "sniffnmask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when absent)
    #[arg(short, long, env = "SNIFFNMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SNIFFNMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Explicit `--config`, else `sniffnmask.toml` if present, else none
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.exists().then_some(local)
        })
    }

    /// Load the configuration the command will run with
    pub fn load_config(&self) -> Result<SniffConfig> {
        load_config_or_default(self.config_path().as_deref())
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect and mask PII in a text file or stdin
    Sanitize(commands::sanitize::SanitizeArgs),

    /// Restore original values in sanitized text using a mapping
    Reconstruct(commands::reconstruct::ReconstructArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
