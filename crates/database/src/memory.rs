//! In-memory backend, for tests and throwaway instances

use crate::store::RecordStore;
use async_trait::async_trait;
use bookboard_core::{Book, Category, Result, StorageError};
use std::sync::RwLock;

/// Record store that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: RwLock<Vec<Category>>,
    books: RwLock<Vec<Book>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Internal {
        message: "memory store lock poisoned".to_string(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append_category(&self, name: &str) -> Result<()> {
        self.categories
            .write()
            .map_err(|_| poisoned())?
            .push(Category::new(name));
        Ok(())
    }

    async fn append_book(&self, book: &Book) -> Result<()> {
        self.books.write().map_err(|_| poisoned())?.push(book.clone());
        Ok(())
    }

    async fn read_all_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.read().map_err(|_| poisoned())?.clone())
    }

    async fn read_all_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().map_err(|_| poisoned())?.clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
