//! Error types for the tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Berry mass is zero, negative or not a number
    #[error("Invalid mass {mass}: must be a positive number of kilograms")]
    InvalidMass { mass: f64 },
    /// Invalid input validation errors (missing id, blank fields, ...)
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Bottle not found for the given ID
    #[error("Bottle with ID {id} not found")]
    BottleNotFound { id: String },
    /// Bottle has no step with the given day label
    #[error("Bottle {bottle_id} has no step for day {day}")]
    StepNotFound { bottle_id: String, day: u32 },
    /// A later step was completed while an earlier one is still pending
    #[error("Cannot complete day {day}: day {pending_day} is still pending")]
    OutOfOrderCompletion { day: u32, pending_day: u32 },
    /// A stored date could not be parsed
    #[error("Invalid date '{value}'")]
    InvalidDate { value: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrackerError {
        TrackerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrackerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Whether the error came from the persistence layer.
    ///
    /// Storage failures abort the operation and reach the caller unmodified;
    /// everything else is a problem with the request or the data.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Database { .. } | Self::FileSystem { .. } | Self::XdgDirectory(_)
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database_error(message, e))
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
