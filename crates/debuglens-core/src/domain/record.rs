//! Upload record persisted after each completed analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An upload record that has not been stored yet.
///
/// The store assigns the identifier at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUploadRecord {
    pub filename: String,
    /// Where the uploaded image was written.
    pub path: String,
    /// OCR output (or the rendered OCR failure).
    pub extracted_text: String,
    /// Rendered inference result.
    pub analysis_result: String,
    pub uploaded_at: DateTime<Utc>,
}
