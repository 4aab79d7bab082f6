use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// How the list route treats `page`, `pageSize` and `sort` values it cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPolicy {
    /// Fall back to the default, the way the mock API always has
    #[default]
    Coerce,
    /// Answer 400
    Strict,
}

fn default_page_size() -> usize {
    10
}

fn default_response_latency_ms() -> u64 {
    500
}

fn default_favorite_latency_ms() -> u64 {
    600
}

/// YAML config file for the widget server. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Catalog JSON file. None = the fixture built into the binary.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Page size of `GET /widget` when the request has none
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Simulated latency of `GET /widget`
    #[serde(default = "default_response_latency_ms")]
    pub response_latency_ms: u64,
    /// Simulated latency of each favorite toggle
    #[serde(default = "default_favorite_latency_ms")]
    pub favorite_latency_ms: u64,
    #[serde(default)]
    pub param_policy: ParamPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_page_size: default_page_size(),
            response_latency_ms: default_response_latency_ms(),
            favorite_latency_ms: default_favorite_latency_ms(),
            param_policy: ParamPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
