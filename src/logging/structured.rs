//! Subscriber setup: human-readable stderr plus optional JSON files

use crate::config::LoggingConfig;
use crate::domain::{Result, SniffError};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "sniffnmask.log";

const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

/// Keeps the file writer's background thread alive
///
/// Dropping the guard flushes buffered file logs. Hold it until exit.
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `level` when set. Console output goes to stderr so
/// stdout stays reserved for command output. With `config.local_enabled`,
/// JSON lines are also written to rotated files under `config.local_path`.
///
/// # Errors
///
/// Returns [`SniffError::Configuration`] for an unknown level or rotation,
/// an uncreatable log directory, or when a subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sniffnmask={level}")));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter.clone());

    let (file, guard) = if config.local_enabled {
        let rotation = parse_rotation(&config.local_rotation)?;
        let (writer, guard) = file_writer(Path::new(&config.local_path), rotation)?;
        let layer = fmt::layer()
            .json()
            .with_thread_ids(true)
            .with_writer(writer)
            .with_filter(filter);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| SniffError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        level = %level,
        file_logs = config.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard { _file: guard })
}

fn file_writer(dir: &Path, rotation: Rotation) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir).map_err(|e| {
        SniffError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let appender = RollingFileAppender::new(rotation, dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}

fn parse_log_level(name: &str) -> Result<Level> {
    let name = name.trim();
    LEVELS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            SniffError::Configuration(format!(
                "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
            ))
        })
}

fn parse_rotation(name: &str) -> Result<Rotation> {
    if name.eq_ignore_ascii_case("daily") {
        Ok(Rotation::DAILY)
    } else if name.eq_ignore_ascii_case("hourly") {
        Ok(Rotation::HOURLY)
    } else {
        Err(SniffError::Configuration(format!(
            "Invalid log rotation: {name}. Must be one of: daily, hourly"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO ; "upper case")]
    #[test_case(" Warn ", Level::WARN ; "padded mixed case")]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level_valid(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("verbose")]
    #[test_case("")]
    #[test_case("3" ; "numeric")]
    fn test_parse_log_level_invalid(input: &str) {
        assert!(parse_log_level(input).is_err());
    }

    #[test]
    fn test_parse_rotation() {
        assert!(parse_rotation("daily").is_ok());
        assert!(parse_rotation("HOURLY").is_ok());
        assert!(parse_rotation("size").is_err());
    }

    #[test]
    fn test_file_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("sniffnmask");
        let (_writer, _guard) = file_writer(&nested, Rotation::NEVER).unwrap();
        assert!(nested.is_dir());
    }
}
