//! Core domain for debuglens.
//!
//! This crate owns the request pipeline that turns an uploaded screenshot
//! into a debugging explanation, along with the port traits the pipeline
//! talks to. It has no knowledge of HTTP, SQL, or process management;
//! adapters in sibling crates implement the ports.
//!
//! Control flow for a single request:
//!
//! ```text
//! AnalysisService -> ResourceGuard (gate) -> UploadStoragePort
//!                 -> TextExtractorPort -> build_debug_prompt
//!                 -> InferenceEnginePort -> UploadRecordRepository -> response
//! ```

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod guard;
pub mod ports;
pub mod prompt;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{
    AppConfig, ConfigError, DEFAULT_MIN_FREE_MEMORY_GB, DatabaseConfig, UploadCollisionPolicy,
    validate_config,
};
pub use domain::{
    AnalysisOutcome, AnalysisRequest, AnalysisResponse, DebugPrompt, InferenceOutcome,
    LOW_MEMORY_ADVISORY, NewUploadRecord, OCR_FAILURE_PREFIX, TextExtraction,
};
pub use guard::{BYTES_PER_GB, MemoryCheck, ResourceGuard, bytes_to_gb};
pub use ports::{
    CoreError, InferenceEnginePort, RepositoryError, StorageError, SystemProbePort,
    TextExtractorPort, UploadRecordRepository, UploadStoragePort,
};
pub use prompt::{RESPONSE_SECTIONS, build_debug_prompt};
pub use services::{AnalysisDeps, AnalysisService};

// Dev-dependencies only exercised by some test modules
#[cfg(test)]
use serde_json as _;
