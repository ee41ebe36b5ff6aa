use std::fs;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initializes the logging system with console output and, when enabled, a
/// daily-rotated JSON log file.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process. `None` means no file layer is active.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    // Respect RUST_LOG if set; otherwise use the configured default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let mut dir_error = None;
    let (file_layer, guard) = if config.json_file {
        match fs::create_dir_all(&config.dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&config.dir, &config.file_name);
                let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
                let layer = fmt::layer().json().with_writer(non_blocking_writer);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                dir_error = Some(e);
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Some(e) = dir_error {
        warn!(
            "JSON log file disabled: cannot create log directory {}: {}",
            config.dir.display(),
            e
        );
    }

    guard
}
