//! Database setup and initialization.
//!
//! Entry points that want to know up front whether the record store is
//! reachable call [`setup_database`]. The request path never does; it relies
//! on [`LazyPool`] connecting on first save.

use std::sync::Arc;

use anyhow::Result;
use debuglens_core::DatabaseConfig;
use sqlx::SqlitePool;

use crate::pool::LazyPool;

/// Build the lazy pool for `config` and force the first connection.
///
/// # Errors
///
/// Returns an error if the connection URL is malformed, the database file
/// cannot be opened or created, or schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use debuglens_core::DatabaseConfig;
/// use debuglens_db::setup_database;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(&DatabaseConfig::default()).await?;
/// assert!(pool.is_connected());
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(config: &DatabaseConfig) -> Result<Arc<LazyPool>> {
    let pool = Arc::new(LazyPool::for_config(config)?);
    pool.get().await?;
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The returned pool is already connected and has the full schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<Arc<LazyPool>> {
    let pool = Arc::new(LazyPool::from_url("sqlite::memory:")?);
    pool.get().await?;
    Ok(pool)
}

/// Creates the database schema.
///
/// Safe to call multiple times; every statement uses IF NOT EXISTS.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS uploads (
            id TEXT PRIMARY KEY NOT NULL,
            filename TEXT NOT NULL,
            path TEXT NOT NULL,
            ocr_text TEXT NOT NULL,
            analysis TEXT NOT NULL,
            uploaded_at TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_uploads_uploaded_at ON uploads(uploaded_at)")
        .execute(pool)
        .await?;

    Ok(())
}
