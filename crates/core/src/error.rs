//! Error types for Bookboard
//!
//! Two families of errors live here:
//! - **ValidationError**: a submitted form field was missing or empty. These are
//!   never shown to the user; the request simply falls through to rendering.
//! - **StorageError**: the record store could not be read or written. These are
//!   surfaced as an error page.
//!
//! Every storage error carries a severity so callers can decide how loudly to
//! report it.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The operation may succeed if simply tried again
    Recoverable,
    /// Some data could not be used but the rest is fine
    Degraded,
    /// The store is unusable until an operator intervenes
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// A submitted field failed the non-empty check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field was absent or blank in the submitted form
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The field became empty after trimming and escaping
    #[error("Field is empty after sanitizing: {0}")]
    EmptyAfterEscape(&'static str),
}

/// Errors raised by the record store
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying medium could not be read or written
    #[error("I/O failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stored line could not be split into its fields
    #[error("Malformed record in {store} at line {line}: {reason}")]
    MalformedRecord {
        store: String,
        line: usize,
        reason: String,
    },

    /// A value cannot be represented in the record format
    #[error("Invalid record: field '{field}' {reason}")]
    InvalidRecord { field: &'static str, reason: String },

    /// The SQL backend reported an error
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A schema migration could not be applied
    #[error("Migration failed: {version} - {reason}")]
    MigrationFailed { version: i64, reason: String },

    /// Anything else, e.g. a blocking task that panicked
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StorageError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IoFailure { source, .. } => match source.kind() {
                io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => {
                    ErrorSeverity::Recoverable
                }
                _ => ErrorSeverity::Fatal,
            },
            Self::Database { .. } => ErrorSeverity::Recoverable,
            Self::MalformedRecord { .. } | Self::InvalidRecord { .. } => ErrorSeverity::Degraded,
            Self::MigrationFailed { .. } | Self::Internal { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns a message suitable for showing on an error page
    pub fn user_message(&self) -> String {
        match self {
            Self::IoFailure { .. } => {
                "The bookshelf could not be read or saved. Please try again later.".to_string()
            }
            Self::MalformedRecord { store, .. } => {
                format!("Some saved {} could not be read.", store)
            }
            Self::InvalidRecord { field, .. } => {
                format!("The {} you entered cannot be saved.", field)
            }
            Self::Database { .. } => {
                "The database is temporarily unavailable. Please try again.".to_string()
            }
            Self::MigrationFailed { .. } => {
                "The database could not be prepared. Please contact the site owner.".to_string()
            }
            Self::Internal { .. } => "An unexpected error occurred. Please try again.".to_string(),
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Helper to create an I/O failure tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience type alias for Results using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::IoFailure {
            path: PathBuf::from("unknown"),
            source: err,
        }
    }
}
