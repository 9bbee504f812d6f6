// Logging setup - env-filtered stderr output plus optional rotating JSON files
//
// The render loop owns stdout, so human-readable logs go to stderr. File
// logging is optional and structured (JSON) for later parsing.
//
// Filter precedence: RUST_LOG env var > config file level > default "info".

use crate::config::{LogRotation, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Returns the file appender's worker guard when file logging is on; the
/// caller must keep it alive for the duration of the program so buffered
/// logs flush on shutdown.
pub fn init(config: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("attune={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !config.file_enabled {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&config.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            config.file_dir, e
        );
        // Fall back to stderr-only logging
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    }

    let file_appender = match config.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
        }
    };

    // Writes happen on a background thread; the guard flushes them on drop.
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}
