//! Text extraction port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::TextExtraction;

/// Converts an image file to text.
///
/// Implementations must never error: unreadable files, decoding problems and
/// engine faults are all reported as [`TextExtraction::Failed`].
#[async_trait]
pub trait TextExtractorPort: Send + Sync {
    async fn extract_text(&self, image_path: &Path) -> TextExtraction;
}
