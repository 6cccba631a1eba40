//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Every crate of the workspace at info, everything else at warn
const DEFAULT_FILTER: &str = "mcsw=info,mc_server_web=info,mcsw_core=info,mcsw_client=info,\
                              mcsw_app=info,mcsw_tui=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/mc-server-web/logs/` so they never
/// interleave with the terminal UI. The log level is controlled by the
/// `MCSW_LOG` environment variable.
///
/// # Examples
/// ```bash
/// MCSW_LOG=debug mcsw
/// MCSW_LOG=mcsw_app=trace,warn mcsw --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "mcsw.log");

    // Default to info for our crates, allow override via MCSW_LOG
    let env_filter =
        EnvFilter::try_from_env("MCSW_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("MC Server Web client starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("mc-server-web").join("logs"))
}
