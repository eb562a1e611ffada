//! Repository implementations using `SQLite`.
//!
//! The `SqlitePool` is confined to this crate and never exposed through the
//! port trait signatures.

mod sqlite_upload_repository;

pub use sqlite_upload_repository::SqliteUploadRepository;
