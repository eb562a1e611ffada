//! Serve command handler.

use debuglens_core::AppConfig;

use crate::error::CliError;

/// Start the HTTP API server. Runs until the listener fails.
pub async fn execute(mut config: AppConfig, port: Option<u16>) -> Result<(), CliError> {
    if let Some(port) = port {
        config.port = port;
    }
    debuglens_axum::start_server(config).await?;
    Ok(())
}
