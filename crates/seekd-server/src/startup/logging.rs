//! Logging initialisation
//!
//! Console layer is always on; a non-blocking rolling file layer under
//! the configured log directory is opt-in. The returned guard must be
//! held for the process lifetime so buffered file output is flushed on
//! exit.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::model::config::LoggingConfig;

/// Holds the non-blocking writer guards for the process lifetime
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // --- Console layer (human-readable, per-layer EnvFilter) ---
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.clone()));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_filter(console_filter);
    layers.push(Box::new(console_layer));

    // --- File layer ---
    if config.file_logging {
        let appender = RollingFileAppender::new(
            tracing_appender::rolling::Rotation::DAILY,
            &config.log_dir,
            "seekd.log",
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let file_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.clone()));
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .with_filter(file_filter);
        layers.push(Box::new(file_layer));
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(LoggingGuard { _guards: guards })
}
