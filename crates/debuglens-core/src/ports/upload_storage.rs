//! Upload storage port.

use std::path::PathBuf;

use async_trait::async_trait;

use super::StorageError;

/// Writes uploaded files to stable storage.
///
/// The destination is derived from the filename alone; how repeated names are
/// handled is up to the implementation's collision policy.
#[async_trait]
pub trait UploadStoragePort: Send + Sync {
    /// Store `data` under `filename` and return the path it was written to.
    async fn store(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError>;
}
