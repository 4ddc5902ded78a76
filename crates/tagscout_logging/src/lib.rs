//! Shared logging utilities for tagscout binaries.
//!
//! Every run logs to a daily rolling file under `~/.tagscout/logs` and to
//! stderr. The file layer is written from a background thread; keep the
//! returned [`LogGuard`] alive until the process exits or trailing lines
//! are lost.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "tagscout=info";

/// Logging configuration shared by tagscout binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Raise console output to `debug` regardless of `RUST_LOG`.
    pub verbose: bool,
}

/// Keeps the non-blocking file writer alive.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize tracing with a rolling file writer and stderr output.
///
/// A log directory that cannot be created is not fatal: the console layer
/// is still installed and a warning is printed.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        EnvFilter::new("tagscout=debug")
    } else {
        file_filter.clone()
    };

    let mut file_guard = None;
    let file_layer = match ensure_logs_dir() {
        Ok(dir) => {
            let appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", sanitize_name(config.app_name)));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(file_filter),
            )
        }
        Err(err) => {
            eprintln!("Warning: failed to create logs directory: {:#}", err);
            None
        }
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Get the tagscout home directory: ~/.tagscout
///
/// `TAGSCOUT_HOME` overrides the location; falls back to the working
/// directory when no home directory can be determined.
pub fn tagscout_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("TAGSCOUT_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .map(|home| home.join(".tagscout"))
        .unwrap_or_else(|| PathBuf::from(".tagscout"))
}

/// Get the logs directory: ~/.tagscout/logs
pub fn logs_dir() -> PathBuf {
    tagscout_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
