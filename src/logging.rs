//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout; `RUST_LOG` overrides `--log-level` when set.

use anyhow::{Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "timerboard.log";

/// Starts logging into `dir`. Keep the guard alive until exit or buffered
/// lines are lost.
pub fn init(dir: &Path, level: &str) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,timerboard={}", level)));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    tracing::info!(log_file = %dir.join(LOG_FILE).display(), level, "logging initialized");
    Ok(guard)
}
