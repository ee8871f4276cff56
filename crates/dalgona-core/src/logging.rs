//! File logging for terminal applications.
//!
//! The terminal owns stdout while a [`Program`](crate::Program) runs, so
//! tracing output goes to a file instead. Components log interaction
//! decisions at `debug` (ignored input on disabled controls, range
//! reconciliation branches) and data problems at `warn`.
//!
//! The filter is read from `RUST_LOG` when set, falling back to
//! [`LogConfig::level`].

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors from installing the log sink.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("cannot open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log file, opened in append mode.
    pub path: PathBuf,
    /// Default level when `RUST_LOG` is unset.
    pub level: Level,
    /// Include the module path of each event.
    pub with_target: bool,
}

impl LogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: Level::INFO,
            with_target: true,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Install a global subscriber writing to `config.path`.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the background writer.
pub fn init_file_logging(config: &LogConfig) -> Result<WorkerGuard, LogError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)
        .map_err(|source| LogError::Open {
            path: config.path.clone(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
        .map_err(|_| LogError::AlreadyInstalled)?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_info() {
        let config = LogConfig::new("dalgona.log");
        assert_eq!(config.level, Level::INFO);
        assert!(config.with_target);
        assert_eq!(config.with_level(Level::DEBUG).level, Level::DEBUG);
    }

    #[test]
    fn unopenable_path_reports_open_error() {
        let config = LogConfig::new("/nonexistent-dalgona-dir/sub/app.log");
        match init_file_logging(&config) {
            Err(LogError::Open { path, .. }) => assert_eq!(path, config.path),
            other => panic!("expected open error, got {:?}", other.map(|_| ())),
        }
    }
}
