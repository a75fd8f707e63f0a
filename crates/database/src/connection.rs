//! SQLite pools for the database backend

use bookboard_core::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;

pub type DbPool = Pool<Sqlite>;

/// Connections kept open against a database file
pub const POOL_SIZE: u32 = 5;

/// Opens the database file at `path`, creating it if needed, in WAL mode
pub async fn connect(path: &Path) -> Result<DbPool, StorageError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(POOL_SIZE)
        .connect_with(options)
        .await
        .map_err(|e| {
            StorageError::database(format!("Failed to open database {}", path.display()), e)
        })?;

    log::info!("Opened SQLite database at {}", path.display());
    Ok(pool)
}

/// Opens a private in-memory database
///
/// The pool holds a single connection, since each connection to
/// `:memory:` would see its own empty database.
pub async fn connect_in_memory() -> Result<DbPool, StorageError> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .journal_mode(SqliteJournalMode::Memory);

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::database("Failed to open in-memory database", e))
}
