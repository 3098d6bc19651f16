//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily-rotated file so they never mix with command output.
//! The level is taken from `RUST_LOG` and defaults to [`DEFAULT_LOG_FILTER`].

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "goji=info,warn";

/// Initialize the logging system.
///
/// Log files are written to the platform's local data directory:
/// - Linux: `~/.local/share/goji/logs/`
/// - macOS: `~/Library/Application Support/goji/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\goji\logs\`
///
/// Use `RUST_LOG=goji=debug` to see each request and response status.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "goji.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), log_dir = %log_dir.display(), "goji starting");

    Ok(())
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("goji").join("logs"))
}

/// Get the path where logs are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}
