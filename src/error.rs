//! Error types for the Spelldex library.
//!
//! Errors are reserved for construction-time concerns: validating an engine
//! configuration, opening or preparing a storage backend, transaction
//! control and reading dictionary files. Ordinary "no effect" outcomes such
//! as a rejected ingestion or a lookup without matches are plain values,
//! never errors.
//!
//! # Examples
//!
//! ```
//! use spelldex::error::{Result, SpelldexError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpelldexError::invalid_config("prefix length must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spelldex operations.
#[derive(Error, Debug)]
pub enum SpelldexError {
    /// I/O errors (dictionary files, database paths).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage backend errors (initialization, schema setup, transactions).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal invariant violations.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by the SQLite driver.
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SpelldexError.
pub type Result<T> = std::result::Result<T, SpelldexError>;

impl SpelldexError {
    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SpelldexError::Storage(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SpelldexError::Internal(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpelldexError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpelldexError::Other(msg.into())
    }
}
