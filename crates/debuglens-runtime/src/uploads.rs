//! Local filesystem upload storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use debuglens_core::{StorageError, UploadCollisionPolicy, UploadStoragePort};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Give up renaming after this many numbered candidates.
const MAX_RENAME_ATTEMPTS: u32 = 10_000;

/// Writes uploads to `<dir>/<filename>`.
///
/// Same-name uploads are resolved by the configured [`UploadCollisionPolicy`].
/// Under `Overwrite`, concurrent uploads of one name race and the last
/// write wins.
pub struct LocalUploadStorage {
    dir: PathBuf,
    policy: UploadCollisionPolicy,
}

impl LocalUploadStorage {
    /// Create the upload directory if needed and return the storage.
    pub async fn create(
        dir: impl Into<PathBuf>,
        policy: UploadCollisionPolicy,
    ) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Io(format!("cannot create {}: {e}", dir.display())))?;
        info!(target: "debuglens.uploads", dir = %dir.display(), %policy, "Upload directory ready");
        Ok(Self { dir, policy })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(data).await?;
        file.flush().await
    }

    async fn store_renamed(&self, name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let (stem, ext) = split_extension(name);
        for n in 0..=MAX_RENAME_ATTEMPTS {
            let candidate = if n == 0 {
                name.to_string()
            } else {
                format!("{stem}-{n}{ext}")
            };
            let path = self.dir.join(&candidate);
            match Self::write_new(&path, data).await {
                Ok(()) => return Ok(path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(io_error(&path, &e)),
            }
        }
        Err(StorageError::Conflict(name.to_string()))
    }
}

#[async_trait]
impl UploadStoragePort for LocalUploadStorage {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        let name = sanitize_filename(filename)?;

        let path = match self.policy {
            UploadCollisionPolicy::Overwrite => {
                let path = self.dir.join(name);
                tokio::fs::write(&path, data)
                    .await
                    .map_err(|e| io_error(&path, &e))?;
                path
            }
            UploadCollisionPolicy::Reject => {
                let path = self.dir.join(name);
                Self::write_new(&path, data).await.map_err(|e| {
                    if e.kind() == ErrorKind::AlreadyExists {
                        StorageError::Conflict(name.to_string())
                    } else {
                        io_error(&path, &e)
                    }
                })?;
                path
            }
            UploadCollisionPolicy::Rename => self.store_renamed(name, data).await?,
        };

        debug!(target: "debuglens.uploads", path = %path.display(), bytes = data.len(), "Upload stored");
        Ok(path)
    }
}

/// Reduce a client-supplied filename to its final path component.
///
/// Both `/` and `\` count as separators. Empty, `.` and `..` are rejected.
pub fn sanitize_filename(raw: &str) -> Result<&str, StorageError> {
    let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default().trim();
    match name {
        "" | "." | ".." => Err(StorageError::InvalidFilename(raw.to_string())),
        name if name.contains('\0') => Err(StorageError::InvalidFilename(raw.to_string())),
        name => Ok(name),
    }
}

/// `"bug.png"` -> `("bug", ".png")`; dotfiles and extensionless names keep
/// everything in the stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> StorageError {
    StorageError::Io(format!("{}: {e}", path.display()))
}
