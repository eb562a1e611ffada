//! Upload record repository trait definition.
//!
//! This port defines the interface for persisting one record per completed
//! analysis. Implementations handle connection management internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::NewUploadRecord;

/// Repository for upload records.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - The store generates the identifier and returns it as an opaque string
/// - Errors propagate; the caller decides whether they matter
#[async_trait]
pub trait UploadRecordRepository: Send + Sync {
    /// Insert a record and return its generated identifier.
    async fn save(&self, record: &NewUploadRecord) -> Result<String, RepositoryError>;
}
