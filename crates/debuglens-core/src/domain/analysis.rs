//! Request, intermediate and response types for a single analysis.

use serde::{Deserialize, Serialize};

/// Prefix of the text returned in place of OCR output when extraction fails.
pub const OCR_FAILURE_PREFIX: &str = "OCR failed: ";

/// Advisory returned when the resource gate refuses a request.
pub const LOW_MEMORY_ADVISORY: &str = "Low system memory. Close other apps and retry.";

/// An uploaded screenshot plus optional hints from the caller.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Filename as supplied by the client.
    pub filename: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Code snippet pasted alongside the screenshot.
    pub code: Option<String>,
    /// Language hint. `None` means auto-detect.
    pub language: Option<String>,
}

impl AnalysisRequest {
    /// Create a request with no code or language hint.
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
            code: None,
            language: None,
        }
    }

    /// Attach a code snippet. Blank snippets are dropped.
    #[must_use]
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code.filter(|c| !c.trim().is_empty());
        self
    }

    /// Attach a language hint. Blank values and `auto` mean no hint.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("auto"));
        self
    }
}

/// Result of running text recognition on an image.
///
/// Extraction never fails the pipeline; a failure is carried as a reason and
/// rendered into the prompt like any other text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextExtraction {
    /// Recognised text, possibly empty.
    Extracted(String),
    /// Why recognition could not be performed.
    Failed(String),
}

impl TextExtraction {
    /// Construct a failure from any displayable reason.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Render the text handed to the prompt and stored in the record.
    ///
    /// Failures become `"OCR failed: <reason>"`.
    pub fn into_text(self) -> String {
        match self {
            Self::Extracted(text) => text,
            Self::Failed(reason) => format!("{OCR_FAILURE_PREFIX}{reason}"),
        }
    }
}

/// Fully rendered instruction prompt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugPrompt(String);

impl DebugPrompt {
    pub(crate) const fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DebugPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one inference engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    /// Engine exited successfully; holds its trimmed standard output.
    Completed(String),
    /// Engine failed to launch, exited non-zero, or timed out.
    Failed {
        /// Engine label used as the error prefix.
        engine: String,
        /// Captured diagnostic stream or a synthesized description.
        diagnostic: String,
    },
}

impl InferenceOutcome {
    pub fn failed(engine: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::Failed {
            engine: engine.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Render the text the caller displays as-is.
    ///
    /// Failures become `"<engine> error: <diagnostic>"`.
    pub fn render(self) -> String {
        match self {
            Self::Completed(text) => text,
            Self::Failed { engine, diagnostic } => format!("{engine} error: {diagnostic}"),
        }
    }
}

/// Body returned to the caller for a completed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Model output, or a rendered inference failure.
    pub analysis: String,
    /// Identifier of the stored record; `null` if persistence failed.
    pub record_id: Option<String>,
}

/// Final state of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Every stage ran; the response is ready.
    Completed(AnalysisResponse),
    /// The resource gate refused the request before any work was done.
    Rejected { advisory: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_hint_normalisation() {
        let req = AnalysisRequest::new("bug.png", vec![]).with_language(Some("auto".into()));
        assert_eq!(req.language, None);

        let req = AnalysisRequest::new("bug.png", vec![]).with_language(Some(" rust ".into()));
        assert_eq!(req.language.as_deref(), Some("rust"));

        let req = AnalysisRequest::new("bug.png", vec![]).with_code(Some("   ".into()));
        assert_eq!(req.code, None);
    }

    #[test]
    fn test_failed_extraction_renders_prefix() {
        let text = TextExtraction::failed("cannot identify image file").into_text();
        assert_eq!(text, "OCR failed: cannot identify image file");
    }

    #[test]
    fn test_extracted_text_is_untouched() {
        let text = TextExtraction::Extracted(String::new()).into_text();
        assert_eq!(text, "");
    }

    #[test]
    fn test_failed_inference_renders_engine_prefix() {
        let outcome = InferenceOutcome::failed("Ollama", "model 'llava:7b' not found");
        assert!(outcome.is_failed());
        assert_eq!(outcome.render(), "Ollama error: model 'llava:7b' not found");
    }

    #[test]
    fn test_response_serializes_camel_case_with_null_id() {
        let response = AnalysisResponse {
            analysis: "Root Cause:\n...".to_string(),
            record_id: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["analysis"], "Root Cause:\n...");
        assert!(json["recordId"].is_null());
        assert!(json.get("record_id").is_none());
    }
}
