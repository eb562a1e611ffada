//! Check command handler.
//!
//! Reports whether an analysis could run right now: free memory against the
//! gate, and whether the OCR and inference binaries resolve. The record
//! store is probed too, but a failure there is only a warning since the
//! pipeline runs without it.

use std::path::Path;
use std::sync::Arc;

use debuglens_core::{AppConfig, ResourceGuard};
use debuglens_db::setup_database;
use debuglens_runtime::DefaultSystemProbe;
use debuglens_runtime::system::tool_version;

use super::format_gb;
use crate::error::CliError;

pub async fn execute(config: &AppConfig) -> Result<(), CliError> {
    let mut problems = Vec::new();

    let guard = ResourceGuard::new(Arc::new(DefaultSystemProbe::new()), config.min_free_memory_gb);
    let check = guard.check();
    let available = check
        .available_bytes
        .map_or_else(|| "unknown".to_string(), format_gb);
    println!(
        "{} Memory: {available} available (floor {:.2} GB)",
        mark(check.sufficient),
        check.minimum_gb
    );
    if !check.sufficient {
        problems.push("insufficient free memory");
    }

    if !report_tool("OCR", &config.ocr_path) {
        problems.push("OCR binary not found");
    }
    if !report_tool(&config.engine_label, &config.engine_path) {
        problems.push("inference engine not found");
    }

    match setup_database(&config.database).await {
        Ok(_) => println!("✓ Records: {}", config.database.connection_url()),
        Err(e) => println!(
            "! Records: {} unavailable ({e:#}); analyses will not be saved",
            config.database.connection_url()
        ),
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::Unavailable(problems.join(", ")))
    }
}

fn report_tool(label: &str, binary: &Path) -> bool {
    let version = tool_version(&binary.to_string_lossy());
    match &version {
        Some(v) => println!("✓ {label}: {} ({v})", binary.display()),
        None => println!("✗ {label}: {} not found", binary.display()),
    }
    version.is_some()
}

const fn mark(ok: bool) -> &'static str {
    if ok { "✓" } else { "✗" }
}
