//! Core error types for questlog-core.
//!
//! This module defines the error hierarchy using thiserror. Domain
//! failures (not found, weekly quota, completion conflicts) are kept
//! distinct from dependency failures (storage, cache) so callers can map
//! them independently.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for questlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Entity missing or not owned by the requesting user.
    ///
    /// Ownership failures deliberately look identical to missing rows so
    /// existence is never leaked across users.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Weekly completion limit reached. Carries a user-facing message.
    #[error("{0}")]
    QuotaExceeded(String),

    /// A concurrent request already performed the same state change.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cache backend errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with the given entity name.
    pub fn not_found(entity: &'static str) -> Self {
        CoreError::NotFound { entity }
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Uniqueness constraint violated
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Database is locked
    #[error("Database is locked")]
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Cache backend errors.
///
/// Invalidation is best-effort: orchestration logs these and carries on,
/// relying on TTL expiry to self-heal.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache backend unavailable or rejected the operation
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, msg) => match inner.code {
                rusqlite::ErrorCode::DatabaseLocked => DatabaseError::Locked,
                rusqlite::ErrorCode::ConstraintViolation => {
                    DatabaseError::Duplicate(msg.clone().unwrap_or_else(|| inner.to_string()))
                }
                _ => DatabaseError::QueryFailed(inner.to_string()),
            },
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(DatabaseError::from(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
