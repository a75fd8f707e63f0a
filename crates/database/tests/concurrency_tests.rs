//! Concurrent appends against the on-disk stores

use bookboard_core::{Book, StorageError};
use bookboard_database::{FlatFileStore, MalformedRecordPolicy, RecordStore, SqliteStore};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

type Result<T> = std::result::Result<T, StorageError>;

const WRITERS: usize = 32;

async fn append_categories_concurrently(store: Arc<dyn RecordStore>) -> Result<()> {
    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.append_category(&format!("Category {}", i)).await
        }));
    }

    for handle in handles {
        handle.await.expect("writer task panicked")?;
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_category_appends_are_whole_lines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(FlatFileStore::open(temp_dir.path())?);

    append_categories_concurrently(store.clone()).await?;

    let raw = std::fs::read_to_string(store.categories_path())?;
    assert_eq!(raw.lines().count(), WRITERS);
    assert!(raw.ends_with('\n'));

    let names: HashSet<String> = store
        .read_all_categories()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let expected: HashSet<String> = (0..WRITERS).map(|i| format!("Category {}", i)).collect();
    assert_eq!(names, expected);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_book_appends_parse_cleanly() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(FlatFileStore::open(temp_dir.path())?);

    let mut handles = Vec::new();
    for i in 0..WRITERS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let book = Book::new(
                format!("Title {}", i),
                format!("http://example.com/{}.pdf", i),
                "Fiction",
            );
            store.append_book(&book).await
        }));
    }
    for handle in handles {
        handle.await.expect("writer task panicked")?;
    }

    let strict = FlatFileStore::open(temp_dir.path())?
        .with_policy(MalformedRecordPolicy::Fail);
    let books = strict.read_all_books().await?;
    assert_eq!(books.len(), WRITERS);
    assert!(books.iter().all(|b| b.category == "Fiction"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_sqlite() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(SqliteStore::open(temp_dir.path().join("shelf.db")).await?);

    append_categories_concurrently(store.clone()).await?;

    assert_eq!(store.read_all_categories().await?.len(), WRITERS);
    Ok(())
}
