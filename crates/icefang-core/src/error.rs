//! Core error types for icefang-core.
//!
//! This module defines the error hierarchy using thiserror. Layout code only
//! ever produces [`ValidationError`]; storage and configuration wrap their
//! failures in [`DatabaseError`] and [`ConfigError`], and everything funnels
//! into [`CoreError`] at the public API.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for icefang-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Record missing, or owned by someone else
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be created
    #[error("Cannot create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which time-of-day field of an event failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeField::Start => f.write_str("start_time"),
            TimeField::End => f.write_str("end_time"),
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Time-of-day not in strict `HH:MM` 24-hour form
    #[error("Event '{event_id}': {field} '{value}' is not a valid HH:MM time")]
    InvalidTime {
        event_id: String,
        field: TimeField,
        value: String,
    },

    /// Calendar day not in strict `YYYY-MM-DD` form
    #[error("Event '{event_id}': date '{value}' is not a valid YYYY-MM-DD day")]
    InvalidDate { event_id: String, value: String },

    /// End time earlier than start time on the same day
    #[error("Event '{event_id}': end_time ({end}) is earlier than start_time ({start})")]
    InvalidRange {
        event_id: String,
        start: String,
        end: String,
    },

    /// Required field missing or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Id of the event the error refers to, when there is one.
    pub fn event_id(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidTime { event_id, .. }
            | ValidationError::InvalidDate { event_id, .. }
            | ValidationError::InvalidRange { event_id, .. } => Some(event_id),
            ValidationError::MissingField(_) | ValidationError::InvalidValue { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
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
