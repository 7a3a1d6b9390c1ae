//! Logging setup for the CLI.
//!
//! Human-readable events go to stderr so stdout stays clean for command
//! output. When a log file or directory is configured, a second JSON layer
//! writes to it through a non-blocking appender.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_PATH_ENV: &str = "PHRASEMINE_LOG_PATH";
const LOG_DIR_ENV: &str = "PHRASEMINE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "phrasemine.log";

/// Where log files go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact file to append to. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the environment, falling back to `log_dir` from the config file.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from), log_dir)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>, log_dir: Option<PathBuf>) -> Self {
        let non_empty = |p: PathBuf| (!p.as_os_str().is_empty()).then_some(p);
        Self {
            log_path: lookup(LOG_PATH_ENV).and_then(non_empty),
            log_dir: lookup(LOG_DIR_ENV).and_then(non_empty).or(log_dir),
        }
    }
}

/// Build the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only, each
/// `-v` raises the level one step, and the config level is the fallback.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, config_level))
}

fn level_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file appender on drop; hold it until exit.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => (
            Some(fmt::layer().json().with_writer(writer).with_ansi(false)),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

fn file_writer(
    config: &ObservabilityConfig,
) -> anyhow::Result<Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)>> {
    if let Some(ref path) = config.log_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        return Ok(Some(tracing_appender::non_blocking(file)));
    }
    if let Some(ref dir) = config.log_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        return Ok(Some(tracing_appender::non_blocking(appender)));
    }
    Ok(None)
}
