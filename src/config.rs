//! MCC configuration loaded from `mcc.toml`.
//!
//! The [`MccConfig`] struct holds every configurable parameter. Values absent
//! from the file fall back to sensible defaults. The `MCC_API_TOKEN`
//! environment variable takes precedence over the file.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration loaded from `mcc.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MccConfig {
    /// Base URL of the agent backend. Empty means no backend is configured
    /// and jobs are driven by the local simulator.
    #[serde(default)]
    pub backend_url: String,

    /// API token sent to the backend as a bearer credential.
    #[serde(default)]
    pub api_token: String,

    /// Interval between simulated driver ticks, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Path of the JSON document the job collection is persisted to.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

// Default tick interval: 2000ms, matching the dashboard's simulation loop.
fn default_tick_interval_ms() -> u64 {
    2000
}

// Default store document: mcc_jobs.json in the working directory.
fn default_store_path() -> String {
    "mcc_jobs.json".to_string()
}

impl Default for MccConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            api_token: String::new(),
            tick_interval_ms: default_tick_interval_ms(),
            store_path: default_store_path(),
        }
    }
}

impl MccConfig {
    /// Load the configuration from `mcc.toml` in the current directory.
    /// Uses defaults if the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new("mcc.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<MccConfig>(&contents)?
        } else {
            Self::default()
        };

        // The environment variable takes precedence over the config file.
        if let Ok(token) = std::env::var("MCC_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = token;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = MccConfig::default();
        assert!(config.backend_url.is_empty());
        assert!(config.api_token.is_empty());
        assert_eq!(config.tick_interval_ms, 2000);
        assert_eq!(config.store_path, "mcc_jobs.json");
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            backend_url = "https://agent.example.com"
            tick_interval_ms = 500
        "#;
        let config: MccConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend_url, "https://agent.example.com");
        assert_eq!(config.tick_interval_ms, 500);
        assert!(config.api_token.is_empty());
        assert_eq!(config.store_path, "mcc_jobs.json");
    }

    #[test]
    fn load_falls_back_to_defaults() {
        // The test working directory typically has no mcc.toml.
        let config = MccConfig::load().unwrap();
        assert_eq!(config.tick_interval_ms, 2000);
    }
}
