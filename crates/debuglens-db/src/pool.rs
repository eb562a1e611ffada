//! Lazily constructed connection pool.
//!
//! The pool is owned explicitly and shared through `Arc`. The first caller of
//! [`LazyPool::get`] connects; concurrent first callers wait on the same
//! initialization instead of racing to build their own pool. A failed attempt
//! leaves the cell empty so the next request retries.

use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};

use debuglens_core::{DatabaseConfig, RepositoryError};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::setup::create_schema;

const SCHEME: &str = "sqlite:";
const IN_MEMORY_PREFIX: &str = "sqlite::memory:";
const FILE_MAX_CONNECTIONS: u32 = 5;

pub struct LazyPool {
    options: SqliteConnectOptions,
    max_connections: u32,
    in_memory: bool,
    cell: OnceCell<SqlitePool>,
    constructions: AtomicUsize,
}

impl LazyPool {
    /// Parse `url` without connecting.
    pub fn from_url(url: &str) -> Result<Self, RepositoryError> {
        if !url.starts_with(SCHEME) {
            return Err(RepositoryError::Connection(format!(
                "unsupported database URL {url:?}: expected {SCHEME}"
            )));
        }
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepositoryError::Connection(format!("invalid database URL {url:?}: {e}")))?
            .create_if_missing(true);
        let in_memory = url.starts_with(IN_MEMORY_PREFIX);

        Ok(Self {
            options,
            // Each in-memory connection would otherwise see its own database.
            max_connections: if in_memory { 1 } else { FILE_MAX_CONNECTIONS },
            in_memory,
            cell: OnceCell::new(),
            constructions: AtomicUsize::new(0),
        })
    }

    pub fn for_config(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        Self::from_url(&config.connection_url())
    }

    /// Return the shared pool, connecting on first use.
    pub async fn get(&self) -> Result<&SqlitePool, RepositoryError> {
        self.cell.get_or_try_init(|| self.connect()).await
    }

    /// Number of connection attempts made so far.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    async fn connect(&self) -> Result<SqlitePool, RepositoryError> {
        self.constructions.fetch_add(1, Ordering::SeqCst);

        if !self.in_memory {
            ensure_parent_dir(self.options.get_filename()).await?;
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(self.max_connections);
        if self.in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(self.options.clone())
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        create_schema(&pool)
            .await
            .map_err(|e| RepositoryError::Storage(format!("schema creation failed: {e}")))?;

        info!(
            target: "debuglens.db",
            filename = %self.options.get_filename().display(),
            max_connections = self.max_connections,
            "Record store connected"
        );
        Ok(pool)
    }
}

async fn ensure_parent_dir(db_path: &Path) -> Result<(), RepositoryError> {
    let Some(parent) = db_path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    debug!(target: "debuglens.db", dir = %parent.display(), "Ensuring database directory");
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| RepositoryError::Connection(format!("cannot create {}: {e}", parent.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_construction_is_deferred() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/db/lazy.db", dir.path().display());

        let pool = LazyPool::from_url(&url).unwrap();

        assert_eq!(pool.constructions(), 0);
        assert!(!pool.is_connected());
        assert!(!dir.path().join("db").exists());
    }

    #[tokio::test]
    async fn test_get_reuses_the_first_pool() {
        let pool = LazyPool::from_url("sqlite::memory:").unwrap();

        pool.get().await.unwrap();
        pool.get().await.unwrap();

        assert_eq!(pool.constructions(), 1);
        assert!(pool.is_connected());
    }

    #[tokio::test]
    async fn test_failed_connect_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the database directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let url = format!("sqlite://{}/app.db", blocker.display());

        let pool = LazyPool::from_url(&url).unwrap();

        assert!(matches!(pool.get().await, Err(RepositoryError::Connection(_))));
        assert!(!pool.is_connected());
        assert!(pool.get().await.is_err());
        assert_eq!(pool.constructions(), 2);
    }

    #[test]
    fn test_rejects_malformed_url() {
        let result = LazyPool::from_url("postgres://localhost/db");
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }
}
