//! Screenshot analysis handler.

use axum::Json;
use axum::extract::{Multipart, State};
use debuglens_core::AnalysisRequest;
use tracing::info;

use crate::dto::AnalyzeReplyDto;
use crate::error::HttpError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const CODE_FIELD: &str = "code";
const LANGUAGE_FIELD: &str = "language";

/// Fields read from the multipart form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<(String, Vec<u8>)>,
    code: Option<String>,
    language: Option<String>,
}

async fn read_form(multipart: &mut Multipart) -> Result<AnalyzeForm, HttpError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                form.file = Some((filename, data.to_vec()));
            }
            CODE_FIELD => form.code = Some(field.text().await?),
            LANGUAGE_FIELD => form.language = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// POST /analyze
///
/// Multipart fields: `file` (required), `code`, `language` (`auto` means
/// no hint). Returns `{ "analysis": ..., "recordId": ... }`, or
/// `{ "error": <advisory> }` when the memory gate refuses the request.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeReplyDto>, HttpError> {
    let form = read_form(&mut multipart).await?;
    let (filename, data) = form
        .file
        .ok_or_else(|| HttpError::BadRequest("missing multipart field 'file'".to_string()))?;

    info!(target: "debuglens.http", %filename, bytes = data.len(), "Analyze request");

    let request = AnalysisRequest::new(filename, data)
        .with_code(form.code)
        .with_language(form.language);

    let outcome = state.analysis.analyze(request).await?;
    Ok(Json(outcome.into()))
}
