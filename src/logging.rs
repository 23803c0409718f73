use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::RuntimeError;

/// Install the global `tracing` subscriber described by `config`.
///
/// Returns `Ok(false)` without installing anything when no log file is
/// configured.
pub fn init(config: &LoggingConfig) -> Result<bool, RuntimeError> {
    let Some(path) = &config.file else {
        return Ok(false);
    };

    let filter =
        EnvFilter::try_new(&config.filter).map_err(|e| RuntimeError::Logging(e.to_string()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RuntimeError::LogFile {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    Ok(true)
}
