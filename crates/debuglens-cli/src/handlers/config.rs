//! Config command handler.

use debuglens_core::AppConfig;

/// Print the effective configuration, one `KEY = value` per line.
pub fn execute(config: &AppConfig) {
    for (key, value) in describe(config) {
        println!("{key:<34} = {value}");
    }
}

fn describe(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("DEBUGLENS_MODEL", config.model.clone()),
        ("DEBUGLENS_ENGINE_PATH", config.engine_path.display().to_string()),
        ("DEBUGLENS_ENGINE_LABEL", config.engine_label.clone()),
        (
            "DEBUGLENS_INFERENCE_TIMEOUT_SECS",
            config.inference_timeout.as_secs().to_string(),
        ),
        ("DEBUGLENS_OCR_PATH", config.ocr_path.display().to_string()),
        (
            "DEBUGLENS_OCR_TIMEOUT_SECS",
            config.ocr_timeout.as_secs().to_string(),
        ),
        ("DEBUGLENS_MAX_IMAGE_SIZE", config.max_image_size.to_string()),
        ("DEBUGLENS_MAX_TOKENS", config.max_tokens.to_string()),
        ("DEBUGLENS_DEVICE", config.device.clone()),
        ("DEBUGLENS_DB_URI", config.database.uri.clone()),
        ("DEBUGLENS_DB_NAME", config.database.name.clone()),
        (
            "DEBUGLENS_MIN_FREE_MEMORY_GB",
            config.min_free_memory_gb.to_string(),
        ),
        ("DEBUGLENS_UPLOAD_DIR", config.upload_dir.display().to_string()),
        (
            "DEBUGLENS_UPLOAD_COLLISION",
            config.collision_policy.to_string(),
        ),
        ("DEBUGLENS_PORT", config.port.to_string()),
        ("DEBUGLENS_CORS_ORIGINS", config.cors_origins.join(",")),
    ]
}
