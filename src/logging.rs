//! Tracing setup for the desktop window and the `ckd-predict` CLI.
//!
//! The window logs at `info` to stdout and to `ckd_predictor_<timestamp>.log`
//! under `.ckd_predictor/logs`, keeping the newest ten launches. The CLI keeps
//! stdout for the prediction itself and only reports warnings on stderr.
//! `RUST_LOG` overrides either default level.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

use crate::app_dirs::{AppDirError, AppDirs};

const KEPT_LAUNCH_LOGS: usize = 10;
const LAUNCH_LOG_PREFIX: &str = "ckd_predictor_";
const LAUNCH_LOG_SUFFIX: &str = ".log";

// Flushes the file writer on exit; lives for the whole process.
static FILE_WRITER: OnceLock<WorkerGuard> = OnceLock::new();

type LocalTimer = fmt::time::OffsetTime<&'static [FormatItem<'static>]>;

/// Where log output goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// stdout plus a per-launch log file.
    Desktop,
    /// stderr only, `warn` and above unless `RUST_LOG` says otherwise.
    Terminal,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("Log file {path} is not accessible: {source}")]
    File { path: PathBuf, source: io::Error },
    #[error("Could not timestamp the log file name: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Logging was already set up: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Install the global subscriber for `target`.
///
/// Repeated desktop calls are no-ops. On error the caller keeps running; events
/// are simply dropped.
pub fn init(target: LogTarget) -> Result<(), LoggingError> {
    match target {
        LogTarget::Desktop => init_desktop(),
        LogTarget::Terminal => init_terminal(),
    }
}

fn init_desktop() -> Result<(), LoggingError> {
    if FILE_WRITER.get().is_some() {
        return Ok(());
    }
    let logs = AppDirs::locate()?.create_logs_dir()?;
    let (path, file) = open_launch_log(&logs, launch_time())?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    prune_launch_logs(&logs, KEPT_LAUNCH_LOGS)?;

    let timer = local_timer();
    tracing_subscriber::registry()
        .with(filter_or("info"))
        .with(fmt::layer().with_timer(timer.clone()).with_writer(io::stdout))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(writer),
        )
        .try_init()?;
    let _ = FILE_WRITER.set(guard);
    tracing::info!(log_file = %path.display(), "CKD Predictor started");
    Ok(())
}

fn init_terminal() -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(filter_or("warn"))
        .with(
            fmt::layer()
                .with_timer(local_timer())
                .with_writer(io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn local_timer() -> LocalTimer {
    const CLOCK: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, CLOCK)
}

fn launch_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `ckd_predictor_YYYY-MM-DD_HH-MM-SS.log`; names sort in launch order.
fn launch_log_name(at: OffsetDateTime) -> Result<String, LoggingError> {
    const STAMP: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!(
        "{LAUNCH_LOG_PREFIX}{}{LAUNCH_LOG_SUFFIX}",
        at.format(STAMP)?
    ))
}

fn is_launch_log(name: &str) -> bool {
    name.starts_with(LAUNCH_LOG_PREFIX) && name.ends_with(LAUNCH_LOG_SUFFIX)
}

fn open_launch_log(dir: &Path, at: OffsetDateTime) -> Result<(PathBuf, File), LoggingError> {
    let path = dir.join(launch_log_name(at)?);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::File {
            path: path.clone(),
            source,
        })?;
    Ok((path, file))
}

/// Delete all but the `keep` newest launch logs, judged by file name.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let entries = fs::read_dir(dir).map_err(|source| LoggingError::File {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut names = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_launch_log(name))
        .collect::<Vec<_>>();
    names.sort_unstable();
    let stale = names.len().saturating_sub(keep);
    for name in &names[..stale] {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(|source| LoggingError::File { path, source })?;
    }
    Ok(())
}
