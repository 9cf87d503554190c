//! Error types for fixture generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Errors that abort a fixture run.
///
/// Nothing is retried: the first error ends the run and fixtures already
/// written stay on disk as they are.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config or manifest JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration failed validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Which constraint was violated.
        message: String,
    },

    /// Every key in the department/id space is already taken.
    #[error("key space exhausted: cannot generate record {requested} of a space of {capacity} keys")]
    KeySpaceExhausted {
        /// 1-based number of the record that could not be generated.
        requested: usize,
        /// Total number of distinct keys available.
        capacity: usize,
    },

    /// A fixture's expected verdict disagrees with its tree (strict mode).
    #[error("fixture test{index} is labeled {expected} but its tree is {actual}")]
    LabelMismatch {
        index: u32,
        expected: bool,
        actual: bool,
    },
}

impl FixtureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
