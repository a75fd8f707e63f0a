//! Category database operations

use crate::DbPool;
use bookboard_core::{Category, StorageError};

/// Inserts one category row
pub async fn insert_category(pool: &DbPool, name: &str) -> Result<(), StorageError> {
    sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| StorageError::database("Failed to insert category", e))?;

    Ok(())
}

/// Lists all categories in insertion order
pub async fn list_categories(pool: &DbPool) -> Result<Vec<Category>, StorageError> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|e| StorageError::database("Failed to list categories", e))?;

    Ok(names.into_iter().map(Category::new).collect())
}
