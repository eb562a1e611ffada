//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::sync::Arc;

use anyhow::Result;
use debuglens_core::{AnalysisDeps, AnalysisService, AppConfig};
use debuglens_db::{LazyPool, SqliteUploadRepository};
use debuglens_runtime::{
    CliInferenceEngine, DefaultSystemProbe, LocalUploadStorage, TesseractExtractor,
};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        if config.allows_any_origin() {
            Self::AllowAll
        } else {
            Self::AllowOrigins(config.cors_origins.clone())
        }
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The request pipeline.
    pub analysis: Arc<AnalysisService>,
    /// Effective configuration, for status endpoints.
    pub config: Arc<AppConfig>,
}

impl AxumContext {
    pub fn new(analysis: AnalysisService, config: AppConfig) -> Self {
        Self {
            analysis: Arc::new(analysis),
            config: Arc::new(config),
        }
    }
}

/// Build the analysis pipeline from configuration.
///
/// Creates the upload directory. The record store is not contacted; it
/// connects on the first save.
pub async fn build_analysis_service(config: &AppConfig) -> Result<AnalysisService> {
    let storage = LocalUploadStorage::create(&config.upload_dir, config.collision_policy).await?;
    let pool = Arc::new(LazyPool::for_config(&config.database)?);

    let deps = AnalysisDeps {
        probe: Arc::new(DefaultSystemProbe::new()),
        storage: Arc::new(storage),
        extractor: Arc::new(TesseractExtractor::from_config(config)),
        engine: Arc::new(CliInferenceEngine::from_config(config)),
        records: Arc::new(SqliteUploadRepository::new(pool)),
    };

    Ok(AnalysisService::new(deps, config.min_free_memory_gb))
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: AppConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "debuglens.bootstrap",
        model = %config.model,
        engine = %config.engine_path.display(),
        ocr = %config.ocr_path.display(),
        upload_dir = %config.upload_dir.display(),
        collision_policy = %config.collision_policy,
        database = %config.database.connection_url(),
        min_free_memory_gb = config.min_free_memory_gb,
        "Axum bootstrap resolved configuration"
    );

    let analysis = build_analysis_service(&config).await?;
    Ok(AxumContext::new(analysis, config))
}

/// Start the Axum server and serve until the listener fails.
pub async fn start_server(config: AppConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let cors = CorsConfig::from_app_config(&config);
    let port = config.port;
    let ctx = bootstrap(config).await?;
    let app = crate::routes::create_router(ctx, &cors);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("debuglens API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_from_default_config_lists_frontend_origins() {
        let cors = CorsConfig::from_app_config(&AppConfig::default());
        match cors {
            CorsConfig::AllowOrigins(origins) => {
                assert!(origins.contains(&"http://localhost:3000".to_string()));
                assert!(origins.contains(&"http://127.0.0.1:3000".to_string()));
            }
            CorsConfig::AllowAll => panic!("default config should not allow every origin"),
        }
    }

    #[test]
    fn test_wildcard_origin_allows_all() {
        let config = AppConfig {
            cors_origins: vec!["*".to_string()],
            ..AppConfig::default()
        };
        assert!(matches!(
            CorsConfig::from_app_config(&config),
            CorsConfig::AllowAll
        ));
    }

    #[tokio::test]
    async fn test_build_creates_upload_dir_without_touching_database() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            upload_dir: tmp.path().join("uploads"),
            database: debuglens_core::DatabaseConfig {
                uri: format!("sqlite://{}/db", tmp.path().display()),
                name: "debuglens".to_string(),
            },
            ..AppConfig::default()
        };

        build_analysis_service(&config).await.unwrap();

        assert!(tmp.path().join("uploads").is_dir());
        assert!(!tmp.path().join("db").exists());
    }
}
