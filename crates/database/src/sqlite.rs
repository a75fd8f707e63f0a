//! SQLite backend

use crate::connection::{connect, connect_in_memory, DbPool};
use crate::migrations::{run_migrations, verify_integrity};
use crate::queries::{books, categories};
use crate::store::RecordStore;
use async_trait::async_trait;
use bookboard_core::{Book, Category, Result};
use std::path::Path;

/// Record store backed by a SQLite database
///
/// Each append is a single `INSERT`, which SQLite applies atomically.
/// Insertion order is kept by the autoincrement row id.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Opens the database file, checks it and brings the schema up to date
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pool = connect(path.as_ref()).await?;
        verify_integrity(&pool).await?;
        Self::with_schema(pool).await
    }

    /// Opens a fresh in-memory database
    pub async fn in_memory() -> Result<Self> {
        let pool = connect_in_memory().await?;
        Self::with_schema(pool).await
    }

    async fn with_schema(pool: DbPool) -> Result<Self> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn append_category(&self, name: &str) -> Result<()> {
        categories::insert_category(&self.pool, name).await
    }

    async fn append_book(&self, book: &Book) -> Result<()> {
        books::insert_book(&self.pool, book).await
    }

    async fn read_all_categories(&self) -> Result<Vec<Category>> {
        categories::list_categories(&self.pool).await
    }

    async fn read_all_books(&self) -> Result<Vec<Book>> {
        books::list_books(&self.pool).await
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
