//! Error types for edupulse.
//!
//! This module defines all error types used throughout the edupulse crate.
//! Most of them are recoverable: a view that hits one degrades to a visible
//! but non-blocking state instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for edupulse operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Database Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Slot Errors ===
    /// A stored slot could not be read back into its expected shape.
    #[error("failed to read slot '{key}': {message}")]
    StorageRead {
        /// The slot key.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    /// A slot could not be written.
    #[error("failed to write slot '{key}': {message}")]
    StorageWrite {
        /// The slot key.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Domain Errors ===
    /// A required field was blank or a value was out of range.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// No entity with the given id exists in the collection.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Entity kind, e.g. `student`.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    // === Assistant Errors ===
    /// The generative text service failed or returned nothing usable.
    #[error("text service error: {0}")]
    ExternalService(String),

    /// The assistant panel already has an outstanding request.
    #[error("a text request is already in flight")]
    RequestInFlight,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for edupulse operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::ExternalService(err.to_string())
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a validation error for the named field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a slot write error.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a slot read error.
    #[must_use]
    pub fn storage_read(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StorageRead {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an external service error.
    #[must_use]
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService(message.into())
    }

    /// Check if this error came from persisting a slot.
    #[must_use]
    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite { .. })
    }

    /// Check if this error should end the process.
    ///
    /// Only configuration and database-open failures are fatal; everything
    /// else is reported and the command carries on or ends normally.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigLoad(_)
                | Self::ConfigValidation { .. }
                | Self::DatabaseOpen { .. }
                | Self::DatabaseMigration { .. }
                | Self::DirectoryCreate { .. }
        )
    }

    /// Check if this error is a lookup miss.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
