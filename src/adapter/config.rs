//! Service Configuration
//!
//! 設定ファイル（JSON）と環境変数からサービス設定を読み込む

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::application::use_cases::query_readings::DEFAULT_QUERY_LIMIT;

pub const ENV_MONGODB_URL: &str = "MONGODB_URL";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_COLLECTION_NAME: &str = "COLLECTION_NAME";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub mongodb_url: String,
    pub db_name: String,
    pub collection_name: String,
    pub bind_address: String,
    pub default_query_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_url: "mongodb://localhost:27017".to_string(),
            db_name: "sensor_db".to_string(),
            collection_name: "sensor_data".to_string(),
            bind_address: "0.0.0.0:8000".to_string(),
            default_query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

/// Expands tilde in path and returns the full path
pub fn expand_config_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

impl Config {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = expand_config_path(path);
        let content = fs::read_to_string(&expanded)
            .with_context(|| format!("Failed to read config file: {}", expanded))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", expanded))?;
        config.validate()?;
        info!("Loaded configuration from {}", expanded);
        Ok(config)
    }

    /// Load from an optional file, then apply process environment overrides
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `MONGODB_URL`, `DB_NAME`, `COLLECTION_NAME` and `BIND_ADDRESS`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_MONGODB_URL) {
            self.mongodb_url = url;
        }
        if let Some(db) = non_empty(ENV_DB_NAME) {
            self.db_name = db;
        }
        if let Some(collection) = non_empty(ENV_COLLECTION_NAME) {
            self.collection_name = collection;
        }
        if let Some(bind) = non_empty(ENV_BIND_ADDRESS) {
            self.bind_address = bind;
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.default_query_limit == 0 {
            anyhow::bail!("default_query_limit must be at least 1");
        }
        Ok(())
    }
}
