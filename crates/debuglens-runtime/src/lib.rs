//! OS-level adapters for the debuglens pipeline.
//!
//! Each type here implements one port from `debuglens-core`:
//!
//! | Adapter | Port |
//! |---|---|
//! | [`DefaultSystemProbe`] | `SystemProbePort` |
//! | [`LocalUploadStorage`] | `UploadStoragePort` |
//! | [`TesseractExtractor`] | `TextExtractorPort` |
//! | [`CliInferenceEngine`] | `InferenceEnginePort` |

#![deny(unsafe_code)]

pub mod inference;
pub mod ocr;
mod process;
pub mod system;
pub mod uploads;

pub use inference::CliInferenceEngine;
pub use ocr::TesseractExtractor;
pub use process::ProcessError;
pub use system::DefaultSystemProbe;
pub use uploads::{LocalUploadStorage, sanitize_filename};
