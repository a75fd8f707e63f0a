//! Database migrations

use crate::DbPool;
use bookboard_core::StorageError;

/// Migration 001: categories and books tables
const MIGRATION_001: &str = include_str!("../migrations/001_initial_schema.sql");

/// All migrations in application order
const MIGRATIONS: &[(i64, &str)] = &[(1, MIGRATION_001)];

/// Runs all pending migrations
pub async fn run_migrations(pool: &DbPool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| StorageError::database("Failed to create migrations table", e))?;

    for (version, sql) in MIGRATIONS {
        run_migration(pool, *version, sql).await?;
    }

    Ok(())
}

/// Runs a single migration if not already applied
async fn run_migration(pool: &DbPool, version: i64, sql: &str) -> Result<(), StorageError> {
    let applied: Option<i64> =
        sqlx::query_scalar("SELECT version FROM schema_migrations WHERE version = ?")
            .bind(version)
            .fetch_optional(pool)
            .await
            .map_err(|e| StorageError::database("Failed to check migration status", e))?;

    if applied.is_some() {
        return Ok(());
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| StorageError::database("Failed to start migration", e))?;

    sqlx::raw_sql(sql)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;

    sqlx::query("INSERT INTO schema_migrations (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::database("Failed to record migration", e))?;

    tx.commit()
        .await
        .map_err(|e| StorageError::database("Failed to commit migration", e))?;

    log::info!("Applied database migration {}", version);
    Ok(())
}

/// Runs SQLite's integrity check; anything but `ok` is an error
pub async fn verify_integrity(pool: &DbPool) -> Result<(), StorageError> {
    let result: String = sqlx::query_scalar("PRAGMA integrity_check")
        .fetch_one(pool)
        .await
        .map_err(|e| StorageError::database("Failed to check integrity", e))?;

    if result != "ok" {
        return Err(StorageError::Database {
            message: format!("Database integrity check failed: {}", result),
            source: None,
        });
    }

    Ok(())
}
