//! Text extraction through the `tesseract` command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use debuglens_core::{AppConfig, TextExtraction, TextExtractorPort};
use tokio::process::Command;
use tracing::debug;

use crate::process::run_captured;

/// Runs `tesseract <image> stdout` and returns what it printed.
///
/// Never fails outright: a missing file, launch error, timeout or non-zero
/// exit becomes [`TextExtraction::Failed`] with the reason.
pub struct TesseractExtractor {
    binary: PathBuf,
    timeout: Duration,
}

impl TesseractExtractor {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.ocr_path, config.ocr_timeout)
    }
}

#[async_trait]
impl TextExtractorPort for TesseractExtractor {
    async fn extract_text(&self, image_path: &Path) -> TextExtraction {
        if !tokio::fs::try_exists(image_path).await.unwrap_or(false) {
            return TextExtraction::failed(format!(
                "cannot open image {}",
                image_path.display()
            ));
        }

        let mut command = Command::new(&self.binary);
        command.arg(image_path).arg("stdout");

        match run_captured(command, self.timeout).await {
            Ok(out) if out.status.success() => {
                let text = clean_output(&out.stdout);
                debug!(target: "debuglens.ocr", chars = text.len(), "Text extracted");
                TextExtraction::Extracted(text)
            }
            Ok(out) => {
                let reason = out.stderr.trim();
                if reason.is_empty() {
                    TextExtraction::failed(format!("tesseract exited with {}", out.status))
                } else {
                    TextExtraction::failed(reason)
                }
            }
            Err(e) => TextExtraction::failed(e),
        }
    }
}

/// Drop trailing whitespace and the page-break form feed tesseract appends.
fn clean_output(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c.is_whitespace() || c == '\u{c}')
        .to_string()
}
