//! Structured logging infrastructure for Curio.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels and optional file output.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking file writer flushing for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set. Calling
/// this more than once is harmless: the first subscriber stays installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.stdout && config.file.is_none() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_to_level(config.level).as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .with_target(true)
        .with_line_number(true);

    let result = match (&config.file, config.stdout) {
        (Some(path), false) => {
            let (writer, guard) = create_non_blocking_file(path)?;
            let _ = FILE_GUARD.set(guard);
            let builder = builder.with_writer(writer).with_ansi(false);
            match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Compact => builder.compact().try_init(),
                LogFormat::Pretty => builder.pretty().try_init(),
                LogFormat::Default => builder.try_init(),
            }
        }
        _ => {
            let builder = builder.with_writer(std::io::stderr);
            match config.format {
                LogFormat::Json => builder.json().try_init(),
                LogFormat::Compact => builder.compact().try_init(),
                LogFormat::Pretty => builder.pretty().try_init(),
                LogFormat::Default => builder.try_init(),
            }
        }
    };

    if config.file.is_some() && config.stdout {
        tracing::warn!("Configured for stdout only; file logging ignored");
    }

    match result {
        Ok(()) => Ok(()),
        // Already initialized by the host application or an earlier call
        Err(e) if is_already_initialized(e.as_ref()) => Ok(()),
        Err(e) => Err(LogError::SubscriberError(e)),
    }
}

fn is_already_initialized(err: &(dyn std::error::Error + Send + Sync)) -> bool {
    let message = err.to_string();
    message.contains("global default") || message.contains("logger")
}

/// Create a non-blocking file writer.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        path.file_name().unwrap_or_default(),
    );

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a LogLevel to a tracing::Level.
pub fn log_level_to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
