//! Bookboard Storage Layer
//!
//! Append-only storage for categories and books behind the [`RecordStore`]
//! trait. Three backends are provided:
//! - [`FlatFileStore`]: line-delimited text files, one per entity
//! - [`SqliteStore`]: SQLite through sqlx
//! - [`MemoryStore`]: process memory, for tests

pub mod connection;
pub mod flat_file;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod record;
pub mod sqlite;
pub mod store;

pub use connection::DbPool;
pub use flat_file::FlatFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{MalformedRecordPolicy, RecordStore};

#[cfg(test)]
mod tests {
    use super::*;
    use bookboard_core::{Book, StorageError};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn exercise(store: Arc<dyn RecordStore>) -> Result<(), StorageError> {
        store.append_category("Fiction").await?;
        store.append_category("History").await?;
        store
            .append_book(&Book::new("A", "http://x", "Fiction"))
            .await?;

        let categories = store.read_all_categories().await?;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "History");

        let books = store.read_all_books().await?;
        assert_eq!(books, vec![Book::new("A", "http://x", "Fiction")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_backends_behave_alike() -> Result<(), StorageError> {
        let temp_dir = TempDir::new()?;

        exercise(Arc::new(FlatFileStore::open(temp_dir.path())?)).await?;
        exercise(Arc::new(SqliteStore::in_memory().await?)).await?;
        exercise(Arc::new(MemoryStore::new())).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_backend_names() -> Result<(), StorageError> {
        let temp_dir = TempDir::new()?;
        let stores: Vec<Arc<dyn RecordStore>> = vec![
            Arc::new(FlatFileStore::open(temp_dir.path())?),
            Arc::new(SqliteStore::in_memory().await?),
            Arc::new(MemoryStore::new()),
        ];

        let names: Vec<_> = stores.iter().map(|s| s.backend_name()).collect();
        assert_eq!(names, vec!["flat_file", "sqlite", "memory"]);
        Ok(())
    }
}
