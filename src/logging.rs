use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Routes `tracing` output to a daily log file under `<data_dir>/logs`.
/// The terminal belongs to the picker, so nothing is written to the console.
///
/// The returned guard flushes the writer on drop and must outlive `main`'s work.
pub fn init(data_dir: &Path) -> Result<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(format!("calpick-{}", env!("CARGO_PKG_VERSION")))
        .filename_suffix("log")
        .build(&log_dir)
        .with_context(|| format!("failed to open log directory {}", log_dir.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}
