//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body (screenshots plus form fields).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            // Credentials cannot be combined with wildcards, so mirror instead.
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

/// API routes without the `/api` prefix (nested under `/api` by the caller).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/system/memory", get(handlers::system::memory))
}

/// Create the application router.
///
/// `/analyze` is also served at the root for existing web clients.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(handlers::analyze::analyze))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub(crate) async fn health_check() -> &'static str {
    "OK"
}
