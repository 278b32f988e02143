//! Error types for the log store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while storing or reading log records.
#[derive(Debug, Error)]
pub enum LogError {
    /// A required field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A level string is not one of `error`, `warn`, `info`, `debug`.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a valid log collection.
    #[error("log store at {} is corrupted: {reason}", path.display())]
    Corrupted {
        /// Location of the backing file.
        path: PathBuf,
        /// What went wrong while decoding it.
        reason: String,
    },

    /// A timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Invalid filter configuration.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

/// Result type alias for log operations.
pub type Result<T> = std::result::Result<T, LogError>;
