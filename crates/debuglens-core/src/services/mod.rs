//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators over ports; they don't know about
//! concrete implementations.

mod analysis;

pub use analysis::{AnalysisDeps, AnalysisService};
