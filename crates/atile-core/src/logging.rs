//! File logging for the interaction layer
//!
//! Everything goes to a daily rolling file; nothing is written to the
//! terminal. The filter comes from `ATILE_LOG` and defaults to `info` for
//! the workspace crates and `warn` for dependencies.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

const LOG_FILE_PREFIX: &str = "atile.log";
const LOG_FILTER_ENV: &str = "ATILE_LOG";
const DEFAULT_FILTER: &str = "aesthetic_tile=info,atile_app=info,atile_relay=info,warn";

/// Default log directory: `<data_local_dir>/aesthetic-tile/logs`
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aesthetic-tile")
        .join("logs")
}

/// Log to the default directory (see [`log_dir`])
///
/// ```bash
/// ATILE_LOG=atile_app=trace cargo test
/// ```
pub fn init() -> Result<()> {
    init_in(&log_dir())
}

/// Log to `dir`, creating it if needed.
///
/// Fails if a global subscriber is already installed.
pub fn init_in(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Logging already initialized: {e}")))?;

    tracing::info!("Logging to {}", dir.display());
    Ok(())
}
