//! Configuration types for the UpDog client

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the UpDog service, without the `/api` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of check results fetched for the detail view
    #[serde(default = "default_results_limit")]
    pub results_limit: u32,
    #[serde(default = "default_min_interval_seconds")]
    pub min_interval_seconds: u32,
    /// Interval pre-filled into the creation form
    #[serde(default = "default_interval_seconds")]
    pub default_interval_seconds: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            results_limit: default_results_limit(),
            min_interval_seconds: default_min_interval_seconds(),
            default_interval_seconds: default_interval_seconds(),
        }
    }
}

impl Config {
    /// Reject values the views cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(crate::ClientError::Config(format!(
                "base_url {:?} is not a valid URL",
                self.base_url
            )));
        }
        if self.results_limit == 0 {
            return Err(crate::ClientError::Config(
                "results_limit must be at least 1".to_string(),
            ));
        }
        if self.default_interval_seconds < self.min_interval_seconds {
            return Err(crate::ClientError::Config(format!(
                "default_interval_seconds ({}) is below min_interval_seconds ({})",
                self.default_interval_seconds, self.min_interval_seconds
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_results_limit() -> u32 {
    crate::api::DEFAULT_RESULTS_LIMIT
}

fn default_min_interval_seconds() -> u32 {
    10
}

fn default_interval_seconds() -> u32 {
    60
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::ClientError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
