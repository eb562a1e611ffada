//! Analysis response DTO.

use debuglens_core::{AnalysisOutcome, AnalysisResponse};
use serde::{Deserialize, Serialize};

/// Body of a `POST /analyze` reply.
///
/// Both shapes are sent with 200 so browser clients that only read `ok`
/// responses still see the advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeReplyDto {
    /// `{ "analysis": ..., "recordId": ... }`
    Completed(AnalysisResponse),
    /// `{ "error": <advisory> }`
    Rejected { error: String },
}

impl From<AnalysisOutcome> for AnalyzeReplyDto {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Completed(response) => Self::Completed(response),
            AnalysisOutcome::Rejected { advisory } => Self::Rejected { error: advisory },
        }
    }
}
