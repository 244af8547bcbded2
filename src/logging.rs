//! File logging for the TUI. The terminal belongs to the UI, so events go to
//! a log file and only when asked for.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "FASTWRITE_LOG";

/// Installs a global subscriber writing to `path`. Keep the guard alive for
/// as long as events should be flushed.
pub fn init(path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|source| Error::io("creating log dir", dir, source))?;
    let file_name = path.file_name().unwrap_or(OsStr::new("fastwrite.log"));

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // someone already installed a subscriber; dropping the guard stops our writer
        Err(_) => Ok(None),
    }
}

pub fn requested_by_env() -> bool {
    std::env::var_os(LOG_ENV).is_some()
}
