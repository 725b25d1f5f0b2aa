//! Core error types for forestfocus-core.
//!
//! Domain outcomes (insufficient coins, missing identity, corrupted
//! snapshots) are not errors here; they degrade to `false` or defaults.
//! This hierarchy covers the ambient failures: storage, configuration,
//! validation of user input, IO and serialization.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for forestfocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The share collaborator could not open the compose target
    #[error("Share failed: {0}")]
    Share(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Identity string was empty
    #[error("Identity must not be empty")]
    EmptyIdentity,

    /// Share text is blank
    #[error("Share text must not be blank")]
    BlankShareText,

    /// Share text exceeds the compose limit
    #[error("Share text is {len} characters, limit is {limit}")]
    ShareTextTooLong { len: usize, limit: usize },

    /// Unknown interval kind name
    #[error("Unknown interval kind '{0}' (expected focus, short-break or long-break)")]
    UnknownIntervalKind(String),

    /// Unknown share template name
    #[error("Unknown share template '{0}' (expected session, tree, milestone or streak)")]
    UnknownTemplate(String),

    /// Unknown report range name
    #[error("Unknown range '{0}' (expected week, month or year)")]
    UnknownRange(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
