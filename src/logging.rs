// Tracing setup. The terminal owns stdout while the UI is up, so logs go
// to a rolling file under the platform data directory. RUST_LOG takes
// precedence over the CLI-provided level.

use directories::BaseDirs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "octoscout.log";

/// Initialize the global subscriber. The returned guard must be held for
/// the life of the program so buffered log lines flush on exit.
pub fn init(level: &str) -> Option<WorkerGuard> {
    let default_filter = format!("octoscout={level}");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let Some(log_dir) = default_log_dir() else {
        tracing_subscriber::registry().with(filter).init();
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: could not create log directory {}: {}", log_dir.display(), e);
        tracing_subscriber::registry().with(filter).init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

fn default_log_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_local_dir().join("octoscout").join("logs"))
}
