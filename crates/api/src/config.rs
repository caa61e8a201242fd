//! Service Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `potability.{toml,json,yaml}` file, then `POTABILITY__*` environment
//! variables (e.g. `POTABILITY__SERVER__PORT=5000`).

use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use serde::Deserialize;

use crate::rate_limit::RateLimitConfig;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "POTABILITY_CONFIG";

/// Default config file stem
pub const DEFAULT_CONFIG_FILE: &str = "potability";

/// Top-level service configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub rate_limit: RateLimitConfig,
    pub validation: ValidationConfig,
    pub log: LogConfig,
    pub metrics: MetricsConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Artifact locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Trained classifier (JSON)
    pub model_path: String,
    /// Fitted scaler (JSON)
    pub scaler_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: "water_quality_model.json".to_string(),
            scaler_path: "scaler.json".to_string(),
        }
    }
}

/// Logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Prometheus exporter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ServiceConfig {
    /// Load from the file named by `POTABILITY_CONFIG` (or `potability.*`) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from a specific file (optional) and the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("POTABILITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
