use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlobfigError {
    #[error("Failed to walk {path}: {source}")]
    DiscoveryError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError { path: PathBuf, source: DecodeError },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("Patterns are required: call .set_patterns() or construct with Globfig::new()")]
    PatternsRequired,

    #[error("Config read task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Failure of a [`Format`](crate::Format) to decode file contents.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
