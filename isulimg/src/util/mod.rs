//! Logging setup shared by the CLI and embedders.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Rotated log files kept next to the active one
const MAX_LOG_FILES: usize = 7;

/// Map a daemon-style log level name to a tracing filter directive.
///
/// Accepts debug, info, warn and error in any case; anything else is info.
pub fn log_level_directive(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "debug" => "debug",
        _ => "info",
    }
}

/// Initialize tracing.
///
/// `RUST_LOG` takes precedence over `level`. Events go to `log_file`, rotated
/// daily as `<log_file>.<date>` with the last 7 files kept, or to stderr
/// without one or when the file cannot be opened. The returned guard flushes
/// the non-blocking writer and must be kept alive.
pub fn init_tracing(log_file: Option<&Path>, level: &str) -> WorkerGuard {
    let directive = log_level_directive(level);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_file) = log_file else {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        register_to_tracing(non_blocking, env_filter);
        return guard;
    };

    let log_dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned);

    let appender = std::fs::create_dir_all(log_dir)
        .map_err(|e| e.to_string())
        .and_then(|()| {
            let prefix = file_name.ok_or_else(|| "log file name is not UTF-8".to_string())?;
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .max_log_files(MAX_LOG_FILES)
                .build(log_dir)
                .map_err(|e| e.to_string())
        });

    match appender {
        Ok(file_appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            register_to_tracing(non_blocking, env_filter);
            guard
        }
        Err(error) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
            register_to_tracing(non_blocking, env_filter);
            tracing::info!(
                log_dir = %log_dir.display(),
                error = %error,
                "Cannot log to file, using stderr"
            );
            guard
        }
    }
}

pub fn register_to_tracing(non_blocking: NonBlocking, env_filter: EnvFilter) {
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false),
        )
        .try_init();
}
