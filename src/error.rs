//! Error types for the I/O shell around the detectors
//!
//! Detection itself never fails. Only catalog loading, survey file reading and
//! the HTTP server produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Crate result alias
pub type Result<T> = std::result::Result<T, CliffError>;

#[derive(Debug, Error)]
pub enum CliffError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog list '{0}' is present but empty")]
    EmptyCatalog(&'static str),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

impl CliffError {
    /// Wrap a read failure with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Wrap a JSON parse failure with a short description of the input
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json { context: context.into(), source }
    }
}
