//! `SQLite` implementation of the upload record repository.

use std::sync::Arc;

use async_trait::async_trait;
use debuglens_core::{NewUploadRecord, RepositoryError, UploadRecordRepository};
use tracing::debug;
use uuid::Uuid;

use crate::pool::LazyPool;

/// `SQLite` implementation of the upload record repository.
pub struct SqliteUploadRepository {
    pool: Arc<LazyPool>,
}

impl SqliteUploadRepository {
    pub const fn new(pool: Arc<LazyPool>) -> Self {
        Self { pool }
    }
}

/// Map `SQLx` errors to `RepositoryError`.
fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection(e.to_string())
        }
        other => {
            let msg = other.to_string();
            if msg.contains("UNIQUE constraint failed") {
                RepositoryError::Constraint(msg)
            } else {
                RepositoryError::Storage(msg)
            }
        }
    }
}

#[async_trait]
impl UploadRecordRepository for SqliteUploadRepository {
    async fn save(&self, record: &NewUploadRecord) -> Result<String, RepositoryError> {
        let pool = self.pool.get().await?;
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r"
            INSERT INTO uploads (id, filename, path, ocr_text, analysis, uploaded_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&id)
        .bind(&record.filename)
        .bind(&record.path)
        .bind(&record.extracted_text)
        .bind(&record.analysis_result)
        .bind(record.uploaded_at)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(target: "debuglens.db", %id, filename = %record.filename, "Upload record saved");
        Ok(id)
    }
}
