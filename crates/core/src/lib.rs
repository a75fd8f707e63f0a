//! Bookboard core types
//!
//! Shared domain models and error types used by the storage layer, the
//! ingestion and listing logic, and the web front end.

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorSeverity, Result, StorageError, ValidationError};
pub use types::{escape_html, sanitize_field, Book, Category};
