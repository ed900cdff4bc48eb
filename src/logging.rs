//! File-based logging module for musicbox-rs
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the console front-end uses stdout for its own output.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "musicbox-rs";
const DEFAULT_FILTER: &str = "musicbox_rs=debug,warn";

/// Initialize the logging system.
///
/// Logs are written to `<directory>/musicbox-rs.YYYY-MM-DD.log` with daily rotation.
/// `RUST_LOG` takes precedence over the configured filter.
///
/// The returned guard flushes pending lines when dropped; keep it alive in `main`.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let log_dir: &Path = &config.directory;
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.filter.as_deref().unwrap_or(DEFAULT_FILTER))
    });

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", log_dir.display());

    Ok(guard)
}
