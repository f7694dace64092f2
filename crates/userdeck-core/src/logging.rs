//! Diagnostic logging setup.
//!
//! Every collaborator failure and precondition warning goes through `tracing`.
//! The interactive UI owns the terminal, so it logs to a file; the
//! non-interactive commands log to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log lines are written.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Append to a file (directory is created if needed).
    File(PathBuf),
    Stderr,
}

/// Keeps the non-blocking file writer alive. Drop it on exit to flush.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Builds the filter: `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes the global subscriber.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(level: &str, target: &LogTarget) -> Result<LogGuard> {
    let filter = build_filter(level);

    match target {
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .map_or_else(|| "userdeck.log".into(), ToOwned::to_owned);

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .try_init()
                .context("Failed to initialize tracing subscriber")?;

            Ok(LogGuard {
                _guard: Some(guard),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize tracing subscriber")?;

            Ok(LogGuard { _guard: None })
        }
    }
}
