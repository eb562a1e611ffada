//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the pipeline expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No process or filesystem implementation details
//! - Fail-soft collaborators (OCR, inference) return outcomes, not `Result`
//! - The record store may fail loudly; isolation is the pipeline's job

pub mod inference;
pub mod system_probe;
pub mod text_extractor;
pub mod upload_record;
pub mod upload_storage;

use thiserror::Error;

pub use inference::InferenceEnginePort;
pub use system_probe::SystemProbePort;
pub use text_extractor::TextExtractorPort;
pub use upload_record::UploadRecordRepository;
pub use upload_storage::UploadStoragePort;

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not establish a connection to the persistence engine.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A constraint was violated (e.g., unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Errors raised while writing an uploaded file to stable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The client-supplied filename cannot be used.
    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    /// A file with this name exists and the collision policy refuses it.
    #[error("Upload already exists: {0}")]
    Conflict(String),

    /// Filesystem failure.
    #[error("Upload write failed: {0}")]
    Io(String),
}

/// Core error type for the request pipeline.
///
/// Every other stage after the gate is fail-soft, so the only way a run
/// aborts is failing to write the upload. Adapters map this to their own
/// error types (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Upload could not be stored.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
