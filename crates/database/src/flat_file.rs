//! Line-delimited text file backend
//!
//! Two files live in one data directory: one for categories, one for books.
//! Every append opens the file in append mode, takes an exclusive advisory
//! lock and writes the whole line in a single call. Readers take a shared lock,
//! so they never see half of a line.

use crate::record;
use crate::store::{MalformedRecordPolicy, RecordStore};
use async_trait::async_trait;
use bookboard_core::{Book, Category, Result, StorageError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Default file name of the category store
pub const DEFAULT_CATEGORIES_FILE: &str = "categories.txt";

/// Default file name of the book store
pub const DEFAULT_BOOKS_FILE: &str = "books.txt";

/// Flat-file record store
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    categories_path: PathBuf,
    books_path: PathBuf,
    policy: MalformedRecordPolicy,
}

impl FlatFileStore {
    /// Opens a store in `dir` with the default file names
    ///
    /// The directory is created if needed. The files themselves are only
    /// created by the first append.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_names(dir, DEFAULT_CATEGORIES_FILE, DEFAULT_BOOKS_FILE)
    }

    /// Opens a store in `dir` with custom file names
    pub fn open_with_names(
        dir: impl AsRef<Path>,
        categories_file: &str,
        books_file: &str,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        log::info!("Opened flat-file store in {}", dir.display());
        Ok(Self {
            categories_path: dir.join(categories_file),
            books_path: dir.join(books_file),
            policy: MalformedRecordPolicy::default(),
        })
    }

    /// Sets how malformed book lines are handled
    pub fn with_policy(mut self, policy: MalformedRecordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Path of the category store
    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }

    /// Path of the book store
    pub fn books_path(&self) -> &Path {
        &self.books_path
    }

    /// Returns the malformed-line policy in effect
    pub fn policy(&self) -> MalformedRecordPolicy {
        self.policy
    }
}

#[async_trait]
impl RecordStore for FlatFileStore {
    async fn append_category(&self, name: &str) -> Result<()> {
        let line = record::encode_category(name)?;
        let path = self.categories_path.clone();
        run_blocking(move || append_line(&path, &line)).await
    }

    async fn append_book(&self, book: &Book) -> Result<()> {
        let line = record::encode_book(book)?;
        let path = self.books_path.clone();
        run_blocking(move || append_line(&path, &line)).await
    }

    async fn read_all_categories(&self) -> Result<Vec<Category>> {
        let path = self.categories_path.clone();
        match run_blocking(move || read_store(&path)).await? {
            Some(contents) => record::parse_categories(
                &contents,
                &store_label(&self.categories_path),
                self.policy,
            ),
            None => Ok(Vec::new()),
        }
    }

    async fn read_all_books(&self) -> Result<Vec<Book>> {
        let path = self.books_path.clone();
        match run_blocking(move || read_store(&path)).await? {
            Some(contents) => {
                record::parse_books(&contents, &store_label(&self.books_path), self.policy)
            }
            None => Ok(Vec::new()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "flat_file"
    }
}

/// Runs blocking file I/O off the async worker threads
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| StorageError::Internal {
            message: format!("storage task failed: {}", e),
        })?
}

/// Appends one complete line under an exclusive lock
fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StorageError::io(path, e))?;

    FileExt::lock_exclusive(&file).map_err(|e| StorageError::io(path, e))?;
    let written = file.write_all(line.as_bytes()).and_then(|()| file.flush());
    let unlocked = FileExt::unlock(&file);

    written.map_err(|e| StorageError::io(path, e))?;
    unlocked.map_err(|e| StorageError::io(path, e))
}

/// Reads a whole store under a shared lock; `None` if it does not exist yet
fn read_store(path: &Path) -> Result<Option<Vec<u8>>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    FileExt::lock_shared(&file).map_err(|e| StorageError::io(path, e))?;
    let mut contents = Vec::new();
    let read = file.read_to_end(&mut contents);
    let unlocked = FileExt::unlock(&file);

    read.map_err(|e| StorageError::io(path, e))?;
    unlocked.map_err(|e| StorageError::io(path, e))?;
    Ok(Some(contents))
}

fn store_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, FlatFileStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FlatFileStore::open(temp_dir.path()).expect("Failed to open store");
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let (_temp_dir, store) = setup_store();
        assert!(store.read_all_categories().await.unwrap().is_empty());
        assert!(store.read_all_books().await.unwrap().is_empty());
        assert!(!store.categories_path().exists());
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("data");
        let store = FlatFileStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.books_path(), dir.join("books.txt"));
    }

    #[tokio::test]
    async fn test_append_category_writes_one_line() {
        let (_temp_dir, store) = setup_store();
        store.append_category("Fiction").await.unwrap();
        store.append_category("History").await.unwrap();

        let raw = fs::read_to_string(store.categories_path()).unwrap();
        assert_eq!(raw, "Fiction\nHistory\n");
    }

    #[tokio::test]
    async fn test_append_book_line_format() {
        let (_temp_dir, store) = setup_store();
        let book = Book::new("Dune", "http://x/dune.pdf", "Fiction");
        store.append_book(&book).await.unwrap();

        let raw = fs::read_to_string(store.books_path()).unwrap();
        assert_eq!(raw, "Dune|http://x/dune.pdf|Fiction\n");
        assert_eq!(store.read_all_books().await.unwrap(), vec![book]);
    }

    #[tokio::test]
    async fn test_append_rejects_separator_without_writing() {
        let (_temp_dir, store) = setup_store();
        let result = store
            .append_book(&Book::new("A|B", "http://x", "Fiction"))
            .await;

        assert!(matches!(result, Err(StorageError::InvalidRecord { .. })));
        assert!(!store.books_path().exists());
    }

    #[tokio::test]
    async fn test_hand_edited_file_with_blank_lines_and_crlf() {
        let (_temp_dir, store) = setup_store();
        fs::write(store.categories_path(), "Fiction\r\n\r\n\nHistory").unwrap();

        let names: Vec<String> = store
            .read_all_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Fiction", "History"]);
    }

    #[tokio::test]
    async fn test_malformed_lines_follow_policy() {
        let (temp_dir, store) = setup_store();
        fs::write(store.books_path(), "A|http://a|Fiction\nbroken line\n").unwrap();

        let books = store.read_all_books().await.unwrap();
        assert_eq!(books.len(), 1);

        let strict = FlatFileStore::open(temp_dir.path())
            .unwrap()
            .with_policy(MalformedRecordPolicy::Fail);
        let err = strict.read_all_books().await.unwrap_err();
        assert!(matches!(err, StorageError::MalformedRecord { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_custom_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let store =
            FlatFileStore::open_with_names(temp_dir.path(), "boards.txt", "links.txt").unwrap();
        store.append_category("Poetry").await.unwrap();
        assert!(temp_dir.path().join("boards.txt").exists());
        assert_eq!(store.backend_name(), "flat_file");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unwritable_store_is_io_failure() {
        let (_temp_dir, store) = setup_store();
        // A directory where the file should be makes the open fail
        fs::create_dir(store.categories_path()).unwrap();

        let err = store.append_category("Fiction").await.unwrap_err();
        assert!(matches!(err, StorageError::IoFailure { .. }));
    }

    #[tokio::test]
    async fn test_undecodable_line_does_not_poison_store() {
        let (temp_dir, store) = setup_store();
        fs::write(
            store.books_path(),
            b"A|http://x|Fiction\nB\xff|http://y|Fiction\n".as_slice(),
        )
        .unwrap();

        let books = store.read_all_books().await.unwrap();
        assert_eq!(books, vec![Book::new("A", "http://x", "Fiction")]);

        let strict = FlatFileStore::open(temp_dir.path())
            .unwrap()
            .with_policy(MalformedRecordPolicy::Fail);
        let err = strict.read_all_books().await.unwrap_err();
        assert!(matches!(err, StorageError::MalformedRecord { line: 2, .. }));
    }
}
