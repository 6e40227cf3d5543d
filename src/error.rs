//! Error types for the logstore library.
//!
//! All fallible operations return [`LogStoreError`] through the crate-wide
//! [`Result`] alias. The core store operations (`add`, `search`) never fail;
//! errors come from construction, configuration, and the command session.
//!
//! # Examples
//!
//! ```
//! use logstore::error::LogStoreError;
//! use logstore::store::RecordStore;
//!
//! let err = RecordStore::new(0).unwrap_err();
//! assert!(matches!(err, LogStoreError::InvalidCapacity(0)));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for logstore operations.
#[derive(Error, Debug)]
pub enum LogStoreError {
    /// A store was requested with a capacity that cannot hold a record.
    ///
    /// Signed so that a negative capacity read from session input is
    /// reported as given.
    #[error("Invalid capacity: {0} (capacity must be at least 1)")]
    InvalidCapacity(i64),

    /// Configuration errors (bad values in a config file, etc.)
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed session input.
    #[error("Command error on line {line}: {message}")]
    Command { line: usize, message: String },

    /// Internal consistency check failed.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// I/O errors while reading commands or writing results
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with LogStoreError.
pub type Result<T> = std::result::Result<T, LogStoreError>;

impl LogStoreError {
    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LogStoreError::Config(msg.into())
    }

    /// Create a new command error for the given 1-based input line.
    pub fn command<S: Into<String>>(line: usize, msg: S) -> Self {
        LogStoreError::Command {
            line,
            message: msg.into(),
        }
    }

    /// Create a new invariant error.
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        LogStoreError::Invariant(msg.into())
    }
}
