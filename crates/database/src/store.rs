//! The record store abstraction
//!
//! Ingestion and listing only ever talk to a [`RecordStore`]. Which medium sits
//! behind it (flat files, SQLite, memory) is decided once at startup.

use async_trait::async_trait;
use bookboard_core::{Book, Category, Result};
use std::fmt;

/// Append-only storage for categories and books
///
/// Implementations must make each append atomic with respect to concurrent
/// writers and must return records in insertion order. Nothing is ever
/// updated or deleted.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Appends one category name
    async fn append_category(&self, name: &str) -> Result<()>;

    /// Appends one book
    async fn append_book(&self, book: &Book) -> Result<()>;

    /// Reads every stored category, duplicates included
    ///
    /// A store that has never been written to yields an empty list.
    async fn read_all_categories(&self) -> Result<Vec<Category>>;

    /// Reads every stored book in insertion order
    async fn read_all_books(&self) -> Result<Vec<Book>>;

    /// Short name of the backend, for logging
    fn backend_name(&self) -> &'static str;
}

/// What to do with a stored line that cannot be split into its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRecordPolicy {
    /// Log the line and leave it out of the result
    #[default]
    Skip,
    /// Fail the whole read
    Fail,
}

impl fmt::Display for MalformedRecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}
