//! Domain types for the analysis pipeline.
//!
//! Every type here is created once per request and never mutated after
//! construction.

mod analysis;
mod record;

pub use analysis::{
    AnalysisOutcome, AnalysisRequest, AnalysisResponse, DebugPrompt, InferenceOutcome,
    LOW_MEMORY_ADVISORY, OCR_FAILURE_PREFIX, TextExtraction,
};
pub use record::NewUploadRecord;
