//! Inference through an engine command line (`ollama run <model> <prompt>`).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use debuglens_core::{AppConfig, DebugPrompt, InferenceEnginePort, InferenceOutcome};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::process::run_captured;

/// Launches one engine process per call and waits for it, up to a timeout.
///
/// The image path is only logged; the engine loads the image through its own
/// mechanism. Launch errors, timeouts and non-zero exits all become
/// [`InferenceOutcome::Failed`] labelled with the engine name.
pub struct CliInferenceEngine {
    binary: PathBuf,
    model: String,
    label: String,
    timeout: Duration,
}

impl CliInferenceEngine {
    pub fn new(
        binary: impl Into<PathBuf>,
        model: impl Into<String>,
        label: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
            label: label.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.engine_path,
            config.model.clone(),
            config.engine_label.clone(),
            config.inference_timeout,
        )
    }

    fn command(&self, prompt: &DebugPrompt) -> Command {
        let mut command = Command::new(&self.binary);
        command.arg("run").arg(&self.model).arg(prompt.as_str());
        command
    }
}

#[async_trait]
impl InferenceEnginePort for CliInferenceEngine {
    async fn run_inference(&self, image_path: &Path, prompt: &DebugPrompt) -> InferenceOutcome {
        debug!(
            target: "debuglens.inference",
            model = %self.model,
            image = %image_path.display(),
            prompt_chars = prompt.as_str().len(),
            "Launching engine"
        );
        let started = Instant::now();

        let outcome = match run_captured(self.command(prompt), self.timeout).await {
            Ok(out) if out.status.success() => {
                InferenceOutcome::Completed(out.stdout.trim().to_string())
            }
            Ok(out) => InferenceOutcome::failed(&self.label, out.stderr),
            Err(e) => InferenceOutcome::failed(&self.label, e.to_string()),
        };

        if let InferenceOutcome::Failed { diagnostic, .. } = &outcome {
            warn!(
                target: "debuglens.inference",
                model = %self.model,
                elapsed_ms = started.elapsed().as_millis(),
                %diagnostic,
                "Engine failed"
            );
        }
        outcome
    }
}
