//! File-based tracing setup.
//!
//! The TUI owns the terminal, so logs go to `<home>/logs/` instead of
//! stdout. Filtered via the POKEDEX_LOG env var (tracing EnvFilter syntax).

use pokedex_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Returns the appender guard, which must
/// stay alive for buffered log lines to be flushed; None if the log
/// directory can't be created or a subscriber is already set.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::daily(&logs_dir, "pokedex.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("POKEDEX_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .is_ok();

    initialized.then_some(guard)
}
