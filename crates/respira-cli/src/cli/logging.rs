//! File-based logging for the TUI.
//!
//! The screen owns stdout and stderr while running, so logs go to a daily
//! rolling file under the respira logs directory instead. Verbosity comes
//! from `RESPIRA_LOG` (standard env-filter syntax); unset means warnings
//! only. Logging is best-effort: if the logs directory can't be created the
//! app runs without it.

use respira_core::config::paths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. The returned guard must stay alive for
/// the duration of the program so buffered log lines get flushed.
pub fn init() -> Option<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, "respira.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("RESPIRA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    result.is_ok().then_some(guard)
}
