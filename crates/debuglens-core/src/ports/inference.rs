//! Inference engine port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{DebugPrompt, InferenceOutcome};

/// Runs the multimodal model against an image and a prompt.
///
/// Launch failures, non-zero exits and timeouts are all reported as
/// [`InferenceOutcome::Failed`] so the pipeline has a single path forward.
#[async_trait]
pub trait InferenceEnginePort: Send + Sync {
    async fn run_inference(&self, image_path: &Path, prompt: &DebugPrompt) -> InferenceOutcome;
}
