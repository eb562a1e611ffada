//! System status handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::MemoryStatusDto;
use crate::state::AppState;

/// GET /api/system/memory
pub async fn memory(State(state): State<AppState>) -> Json<MemoryStatusDto> {
    Json(state.analysis.guard().check().into())
}
