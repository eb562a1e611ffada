//! Axum web server adapter for debuglens.
//!
//! `bootstrap` wires the concrete adapters into an `AnalysisService`;
//! `routes` exposes it over HTTP:
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | `GET` | `/health` | liveness |
//! | `POST` | `/analyze`, `/api/analyze` | multipart screenshot analysis |
//! | `GET` | `/api/system/memory` | resource gate status |

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests under tests/
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, bootstrap, build_analysis_service, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
