use std::path::PathBuf;

use thiserror::Error;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::paths;

pub const LOG_FILE: &str = "ted.log";

/// Directives used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
	#[error("create log directory {} failed", path.display())]
	CreateLogDir {
		path:   PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("install tracing subscriber failed")]
	InitSubscriber {
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

/// Keeps the background log writer running. Pending lines are flushed when it is dropped, so hold
/// it until the editor exits.
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
	_writer: WorkerGuard,
}

/// Routes tracing output to [`LOG_FILE`] under [`paths::log_dir`] through a non-blocking writer.
/// Nothing goes to stdout or stderr while the editor owns the terminal.
pub fn init_logging() -> Result<LogGuard, LoggingError> {
	let dir = paths::log_dir();
	std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateLogDir { path: dir.clone(), source })?;

	let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, LOG_FILE));
	tracing_subscriber::fmt()
		.with_timer(UtcTime::new(format_description!(
			"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
		)))
		.with_env_filter(env_filter())
		.with_writer(writer)
		.with_ansi(false)
		.with_target(false)
		.try_init()
		.map_err(|source| LoggingError::InitSubscriber { source })?;

	tracing::info!(version = env!("CARGO_PKG_VERSION"), dir = %dir.display(), "logging started");
	Ok(LogGuard { _writer: guard })
}

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
