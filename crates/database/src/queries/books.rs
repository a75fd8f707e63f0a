//! Book database operations

use crate::DbPool;
use bookboard_core::{Book, StorageError};

/// Inserts one book row
pub async fn insert_book(pool: &DbPool, book: &Book) -> Result<(), StorageError> {
    sqlx::query("INSERT INTO books (title, link, category) VALUES (?, ?, ?)")
        .bind(&book.title)
        .bind(&book.link)
        .bind(&book.category)
        .execute(pool)
        .await
        .map_err(|e| StorageError::database("Failed to insert book", e))?;

    Ok(())
}

/// Lists all books in insertion order
pub async fn list_books(pool: &DbPool) -> Result<Vec<Book>, StorageError> {
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT title, link, category FROM books ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(|e| StorageError::database("Failed to list books", e))?;

    Ok(rows.into_iter().map(row_to_book).collect())
}

fn row_to_book((title, link, category): (String, String, String)) -> Book {
    Book::new(title, link, category)
}
