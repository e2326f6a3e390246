//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr so `--json` output on stdout stays
//! machine-readable. When a log path or directory is configured, events are
//! also written as JSON lines through a non-blocking file appender.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "CV_LINT_LOG_PATH";
const LOG_DIR_ENV: &str = "CV_LINT_LOG_DIR";
const LOG_FILE_PREFIX: &str = "cv-lint";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append to. Takes precedence over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated `cv-lint.*.jsonl` files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `CV_LINT_LOG_PATH` / `CV_LINT_LOG_DIR`, falling back to the
    /// configured log directory when neither is set.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            log_path: env_path,
            log_dir: env_dir.or(config_dir),
        }
    }

    fn file_appender(&self) -> anyhow::Result<Option<RollingFileAppender>> {
        if let Some(ref path) = self.log_path {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(dir)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            return Ok(Some(appender));
        }

        if let Some(ref dir) = self.log_dir {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("jsonl")
                .build(dir)
                .with_context(|| format!("failed to open log directory {}", dir.display()))?;
            return Ok(Some(appender));
        }

        Ok(None)
    }
}

/// Build the level filter: `RUST_LOG` wins, then `-q`/`-v`, then the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, config_level))
}

fn level_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Hold the returned guard for the life of the process; dropping it flushes
/// buffered file logs.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.file_appender()? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}
