use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;
use crate::error::AppError;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// 终端被 TUI 占用，日志只写文件 (<data_dir>/logs/studynotes.log)
pub fn init_tracing(logging: &LoggingConfig, data_dir: &Path) -> Result<(), AppError> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level).map_err(|e| AppError::Logging(e.to_string()))?,
    };

    let dir = data_dir.join("logs");
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(dir, "studynotes.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
