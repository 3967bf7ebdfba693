//! File logging for terminal applications.
//!
//! The terminal owns stdout/stderr while the UI runs, so logs go to a file
//! under a per-application directory.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a global subscriber writing to `<dir>/<app_name>.log`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Keep the returned
/// guard alive for as long as logs should be flushed.
pub fn init_file_logging(dir: Option<&Path>, app_name: &str) -> anyhow::Result<WorkerGuard> {
    let log_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_directory(app_name),
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, format!("{app_name}.log"));
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Log file: {}", log_dir.join(format!("{app_name}.log")).display());
    Ok(guard)
}

/// Get the platform-specific log directory for `app_name`.
pub fn default_log_directory(app_name: &str) -> PathBuf {
    let base = if cfg!(target_os = "macos") {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join("Library").join("Caches"))
    } else if cfg!(target_os = "windows") {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
    };

    base.unwrap_or_else(std::env::temp_dir)
        .join(app_name)
        .join("logs")
}
