//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable that overrides the log filter
pub const LOG_ENV_VAR: &str = "SNIPKIT_LOG";

const LOG_FILE_NAME: &str = "snipkit.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/snipkit/logs/` so that command output
/// on stdout stays clean. Log level is controlled by `SNIPKIT_LOG`.
///
/// # Examples
/// ```bash
/// SNIPKIT_LOG=debug snipkit check
/// SNIPKIT_LOG=snipkit_core=trace snipkit groups
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for our crates, allow override via SNIPKIT_LOG
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("snipkit=info,snipkit_core=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("snipkit starting, log directory: {}", log_dir.display());

    Ok(())
}

/// Directory holding the daily `snipkit.log.YYYY-MM-DD` files
pub fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("snipkit").join("logs")
}
