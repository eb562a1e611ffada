//! `SQLite` record store for debuglens.
//!
//! Every completed analysis is appended to the `uploads` table. The pool is
//! built lazily on first use by [`LazyPool`], so a missing or unreachable
//! database never blocks startup and never fails a request.

#![deny(unsafe_code)]

pub mod pool;
pub mod repositories;
pub mod setup;

pub use pool::LazyPool;
pub use repositories::SqliteUploadRepository;

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
