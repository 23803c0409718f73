use std::path::PathBuf;

/// Reasons a move is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("column number must be between 1 and 7")]
    InvalidColumn,

    #[error("column is full")]
    FullColumn,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors raised by the rendering host.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}
