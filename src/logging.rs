//! Tracing setup. The terminal UI owns stdout, so interactive sessions log to
//! a daily rolling file; one-shot CLI commands log to stderr.

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hermes=info,hermes_lib=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("HERMES_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the file logger. Keep the returned guard alive for the whole
/// session or buffered lines are lost. Returns `None` when no log directory
/// is available; logging is then disabled.
pub fn init_file_logging() -> Option<WorkerGuard> {
    let proj = ProjectDirs::from("dev", "hermes", "hermes")?;
    let log_dir = proj.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "hermes.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
