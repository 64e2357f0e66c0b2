// SniffNMask - Reversible PII Masking
// Copyright (c) 2025 SniffNMask Contributors
// Licensed under the MIT License

use clap::Parser;
use sniffnmask::cli::{Cli, Commands};
use sniffnmask::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the configuration when it loads; a broken
    // configuration is reported by the command itself.
    let config = cli.load_config().ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "SniffNMask - Reversible PII Masking"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Sanitize(args) => args.execute(cli).await,
        Commands::Reconstruct(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(cli).await,
        Commands::Init(args) => args.execute().await,
    }
}
