//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the process-wide tracing subscriber
//! - Route every event at INFO and above to `info.log`
//! - Route ERROR events additionally to `error.log`
//! - Mirror events to stdout for interactive runs
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - File writers are non-blocking; their guards live in `LogGuard`
//! - Log level configurable via `RUST_LOG`

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

const INFO_LOG: &str = "info.log";
const ERROR_LOG: &str = "error.log";
const DEFAULT_FILTER: &str = "musannif=info,tower_http=info";

/// Error type for log sink setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot install global subscriber: {0}")]
    Subscriber(String),
}

/// Locations of the two log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingPaths {
    pub info_log: PathBuf,
    pub error_log: PathBuf,
}

impl LoggingPaths {
    /// Standard file names inside `directory`.
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        let directory = directory.as_ref();
        Self {
            info_log: directory.join(INFO_LOG),
            error_log: directory.join(ERROR_LOG),
        }
    }
}

/// Keeps the background log writers alive.
///
/// Dropping it flushes pending lines to disk, so it must outlive every
/// component that logs.
#[derive(Default)]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard")
            .field("writers", &self._guards.len())
            .finish()
    }
}

/// Install the global subscriber writing to the given files.
pub fn init(paths: &LoggingPaths) -> Result<LogGuard, LoggingError> {
    let (info_writer, info_guard) = tracing_appender::non_blocking(open_append(&paths.info_log)?);
    let (error_writer, error_guard) =
        tracing_appender::non_blocking(open_append(&paths.error_log)?);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(info_writer))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(error_writer)
                .with_filter(LevelFilter::ERROR),
        )
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    tracing::info!(
        info_log = %paths.info_log.display(),
        error_log = %paths.error_log.display(),
        "Logger initialized"
    );

    Ok(LogGuard {
        _guards: vec![info_guard, error_guard],
    })
}

/// Open a log file for appending, creating its directory if needed.
fn open_append(path: &Path) -> Result<File, LoggingError> {
    let open_error = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(open_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_in_directory() {
        let paths = LoggingPaths::in_directory("/var/log/musannif");
        assert_eq!(paths.info_log, PathBuf::from("/var/log/musannif/info.log"));
        assert_eq!(paths.error_log, PathBuf::from("/var/log/musannif/error.log"));
    }

    #[test]
    fn test_open_append_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/info.log");

        open_append(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_append_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let err = open_append(dir.path()).unwrap_err();
        match err {
            LoggingError::Open { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
