//! Application configuration and validation.
//!
//! Configuration is read from environment variables (the binary loads a
//! `.env` file first). Every option has a default, so an empty environment
//! yields a working local setup: `ollama run llava:7b`, `tesseract`, and a
//! SQLite database under `./data`.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default floor of free memory required before inference is launched.
pub const DEFAULT_MIN_FREE_MEMORY_GB: f64 = 0.3;

/// Default model identifier handed to the inference engine.
pub const DEFAULT_MODEL: &str = "llava:7b";

/// Default HTTP port (matches the port the web frontend targets).
pub const DEFAULT_PORT: u16 = 8000;

/// Origins the bundled web frontend is served from during development.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// What to do when an upload arrives with a filename that is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadCollisionPolicy {
    /// Replace the existing file. Concurrent uploads of the same name race
    /// and the last write wins.
    #[default]
    Overwrite,
    /// Keep the existing file and store the new one under `name-N.ext`.
    Rename,
    /// Refuse the upload.
    Reject,
}

impl FromStr for UploadCollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "rename" => Ok(Self::Rename),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown collision policy '{other}' (expected overwrite, rename or reject)"
            )),
        }
    }
}

impl std::fmt::Display for UploadCollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Rename => write!(f, "rename"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Persistence endpoint plus logical database name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Endpoint URI. For SQLite this names the directory holding the database
    /// files, or `sqlite::memory:` for a throwaway in-memory store.
    pub uri: String,
    /// Logical database name; becomes `<name>.db` inside the endpoint directory.
    pub name: String,
}

impl DatabaseConfig {
    /// Resolve the connection URL for the configured endpoint and database.
    pub fn connection_url(&self) -> String {
        if self.uri.starts_with("sqlite::memory:") {
            return self.uri.clone();
        }
        format!("{}/{}.db", self.uri.trim_end_matches('/'), self.name)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "sqlite://data".to_string(),
            name: "debuglens".to_string(),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Model identifier passed as `<engine> run <model> <prompt>`.
    pub model: String,
    /// Inference engine binary.
    pub engine_path: PathBuf,
    /// Human-readable engine name used as the error prefix (`"<label> error: ..."`).
    pub engine_label: String,
    /// Upper bound on a single inference call.
    pub inference_timeout: Duration,
    /// OCR binary.
    pub ocr_path: PathBuf,
    /// Upper bound on a single OCR call.
    pub ocr_timeout: Duration,
    /// Maximum accepted image dimension in pixels. Reported, not enforced.
    pub max_image_size: u32,
    /// Maximum output token budget. Advisory only; the engine CLI ignores it.
    pub max_tokens: u32,
    /// Execution device hint (`cpu`, `cuda`, ...).
    pub device: String,
    pub database: DatabaseConfig,
    /// Free memory floor for the resource gate, in GB.
    pub min_free_memory_gb: f64,
    /// Directory uploaded images are written to.
    pub upload_dir: PathBuf,
    pub collision_policy: UploadCollisionPolicy,
    /// HTTP listen port.
    pub port: u16,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            engine_path: PathBuf::from("ollama"),
            engine_label: "Ollama".to_string(),
            inference_timeout: Duration::from_secs(300),
            ocr_path: PathBuf::from("tesseract"),
            ocr_timeout: Duration::from_secs(60),
            max_image_size: 1280,
            max_tokens: 512,
            device: "cpu".to_string(),
            database: DatabaseConfig::default(),
            min_free_memory_gb: DEFAULT_MIN_FREE_MEMORY_GB,
            upload_dir: PathBuf::from("uploads"),
            collision_policy: UploadCollisionPolicy::default(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or blank variables fall back to defaults. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            model: get("DEBUGLENS_MODEL").unwrap_or(defaults.model),
            engine_path: get("DEBUGLENS_ENGINE_PATH").map_or(defaults.engine_path, PathBuf::from),
            engine_label: get("DEBUGLENS_ENGINE_LABEL").unwrap_or(defaults.engine_label),
            inference_timeout: parse_var(&get, "DEBUGLENS_INFERENCE_TIMEOUT_SECS")?
                .map_or(defaults.inference_timeout, Duration::from_secs),
            ocr_path: get("DEBUGLENS_OCR_PATH").map_or(defaults.ocr_path, PathBuf::from),
            ocr_timeout: parse_var(&get, "DEBUGLENS_OCR_TIMEOUT_SECS")?
                .map_or(defaults.ocr_timeout, Duration::from_secs),
            max_image_size: parse_var(&get, "DEBUGLENS_MAX_IMAGE_SIZE")?
                .unwrap_or(defaults.max_image_size),
            max_tokens: parse_var(&get, "DEBUGLENS_MAX_TOKENS")?.unwrap_or(defaults.max_tokens),
            device: get("DEBUGLENS_DEVICE").unwrap_or(defaults.device),
            database: DatabaseConfig {
                uri: get("DEBUGLENS_DB_URI").unwrap_or(defaults.database.uri),
                name: get("DEBUGLENS_DB_NAME").unwrap_or(defaults.database.name),
            },
            min_free_memory_gb: parse_var(&get, "DEBUGLENS_MIN_FREE_MEMORY_GB")?
                .unwrap_or(defaults.min_free_memory_gb),
            upload_dir: get("DEBUGLENS_UPLOAD_DIR").map_or(defaults.upload_dir, PathBuf::from),
            collision_policy: parse_var(&get, "DEBUGLENS_UPLOAD_COLLISION")?
                .unwrap_or(defaults.collision_policy),
            port: parse_var(&get, "DEBUGLENS_PORT")?.unwrap_or(defaults.port),
            cors_origins: get("DEBUGLENS_CORS_ORIGINS").map_or(defaults.cors_origins, |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            }),
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Whether CORS should allow every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Configuration validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("Minimum free memory must be a finite, non-negative number of GB, got {0}")]
    InvalidMemoryFloor(f64),

    #[error("Database name must not contain path separators, got '{0}'")]
    InvalidDatabaseName(String),
}

/// Validate a configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::Empty("Model identifier"));
    }
    if config.engine_path.as_os_str().is_empty() {
        return Err(ConfigError::Empty("Engine path"));
    }
    if config.ocr_path.as_os_str().is_empty() {
        return Err(ConfigError::Empty("OCR path"));
    }
    if config.inference_timeout.is_zero() {
        return Err(ConfigError::NotPositive("Inference timeout"));
    }
    if config.ocr_timeout.is_zero() {
        return Err(ConfigError::NotPositive("OCR timeout"));
    }
    if config.max_image_size == 0 {
        return Err(ConfigError::NotPositive("Maximum image size"));
    }
    if !config.min_free_memory_gb.is_finite() || config.min_free_memory_gb < 0.0 {
        return Err(ConfigError::InvalidMemoryFloor(config.min_free_memory_gb));
    }

    let name = &config.database.name;
    if name.trim().is_empty() {
        return Err(ConfigError::Empty("Database name"));
    }
    if name.contains(['/', '\\']) || name == ".." {
        return Err(ConfigError::InvalidDatabaseName(name.clone()));
    }
    if config.database.uri.trim().is_empty() {
        return Err(ConfigError::Empty("Database URI"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model, "llava:7b");
        assert!((config.min_free_memory_gb - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.collision_policy, UploadCollisionPolicy::Overwrite);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DEBUGLENS_MODEL", "llava:13b"),
            ("DEBUGLENS_ENGINE_PATH", "/opt/ollama/bin/ollama"),
            ("DEBUGLENS_INFERENCE_TIMEOUT_SECS", "45"),
            ("DEBUGLENS_MIN_FREE_MEMORY_GB", "1.5"),
            ("DEBUGLENS_UPLOAD_COLLISION", "Rename"),
            ("DEBUGLENS_DB_NAME", "audit"),
            ("DEBUGLENS_CORS_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();

        assert_eq!(config.model, "llava:13b");
        assert_eq!(config.engine_path, PathBuf::from("/opt/ollama/bin/ollama"));
        assert_eq!(config.inference_timeout, Duration::from_secs(45));
        assert!((config.min_free_memory_gb - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.collision_policy, UploadCollisionPolicy::Rename);
        assert_eq!(config.database.name, "audit");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("DEBUGLENS_MODEL", "  ")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_unparseable_number_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("DEBUGLENS_PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "DEBUGLENS_PORT"));
    }

    #[test]
    fn test_unknown_collision_policy_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("DEBUGLENS_UPLOAD_COLLISION", "merge")]))
            .unwrap_err();
        assert!(err.to_string().contains("merge"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.inference_timeout = Duration::ZERO;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::NotPositive(_))
        ));

        let mut config = AppConfig::default();
        config.min_free_memory_gb = -1.0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidMemoryFloor(_))
        ));

        let mut config = AppConfig::default();
        config.database.name = "../escape".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidDatabaseName(_))
        ));
    }

    #[test]
    fn test_connection_url() {
        let db = DatabaseConfig::default();
        assert_eq!(db.connection_url(), "sqlite://data/debuglens.db");

        let db = DatabaseConfig {
            uri: "sqlite:///var/lib/debuglens/".to_string(),
            name: "audit".to_string(),
        };
        assert_eq!(db.connection_url(), "sqlite:///var/lib/debuglens/audit.db");

        let db = DatabaseConfig {
            uri: "sqlite::memory:".to_string(),
            name: "ignored".to_string(),
        };
        assert_eq!(db.connection_url(), "sqlite::memory:");
    }

    #[test]
    fn test_wildcard_cors() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DEBUGLENS_CORS_ORIGINS", "*")])).unwrap();
        assert!(config.allows_any_origin());
        assert!(!AppConfig::default().allows_any_origin());
    }
}
