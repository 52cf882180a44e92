//! Client configuration.
//!
//! Settings come from a YAML file under the user's config directory, then
//! from `GYM_*` environment variables, then from command-line flags. A missing
//! default file is not an error; the built-in defaults point at a local
//! development backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_API_URL: &str = "GYM_API_URL";
pub const ENV_MEDIA_URL: &str = "GYM_MEDIA_URL";
pub const ENV_API_TOKEN: &str = "GYM_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Invalid URL '{0}': must start with http:// or https://")]
    InvalidUrl(String),

    #[error("Timeout must be at least one second")]
    InvalidTimeout,
}

/// Connection settings for the gym REST service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the REST API, e.g. `http://127.0.0.1:8000/api`
    pub base_url: String,
    /// Origin that relative media paths (post images) are served from
    pub media_base_url: String,
    pub timeout_secs: u64,
    /// Pre-issued API token; usually obtained through `gym login` instead
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            media_base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
            token: None,
        }
    }
}

impl ClientConfig {
    /// `<config dir>/gym-manager/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gym-manager").join("config.yaml"))
    }

    /// Load from an explicit path (which must exist) or from the default path (which may not)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    log::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ClientConfig = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as YAML, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(io_error)?;

        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply `GYM_API_URL`, `GYM_MEDIA_URL` and `GYM_API_TOKEN` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; blank values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(url) = lookup(ENV_MEDIA_URL) {
            self.media_base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in [&self.base_url, &self.media_base_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
