//! CLI bootstrap - the composition root.
//!
//! Configuration is resolved here; commands that run the pipeline get a
//! fully wired `CliContext`. The wiring itself is shared with the HTTP
//! adapter through `debuglens_axum::build_analysis_service`.

use debuglens_core::{AnalysisService, AppConfig};

use crate::error::CliError;

/// Load configuration from the environment.
pub fn load_config() -> Result<AppConfig, CliError> {
    Ok(AppConfig::from_env()?)
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub config: AppConfig,
    pub analysis: AnalysisService,
}

/// Wire the analysis pipeline for `config`.
pub async fn bootstrap(config: AppConfig) -> Result<CliContext, CliError> {
    tracing::debug!(
        target: "debuglens.bootstrap",
        model = %config.model,
        upload_dir = %config.upload_dir.display(),
        "CLI bootstrap"
    );
    let analysis = debuglens_axum::build_analysis_service(&config).await?;
    Ok(CliContext { config, analysis })
}
