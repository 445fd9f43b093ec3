// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration management.
//!
//! Configuration is stored in `<config dir>/tmv/config.toml` and includes:
//! - `[application]`: OAuth client credentials registered for this tool
//! - `[tokens]`: the bearer and refresh tokens obtained by `tmv login`
//! - `[api]`: service hosts and the retry policy for API calls

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "tmv";
const CONFIG_FILE_NAME: &str = "config.toml";

/// User configuration stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub tokens: TokenConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// OAuth application credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Tokens persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// API endpoint and retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host (default: "api.assembla.com").
    #[serde(default = "default_host")]
    pub host: String,
    /// Host serving the authorization and token endpoints.
    #[serde(default = "default_host")]
    pub auth_host: String,
    /// Retries after a transient gateway error (default: 3).
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Delay between retries in milliseconds (default: 3000).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Per-request timeout in seconds (default: 60).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "api.assembla.com".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: default_host(),
            auth_host: default_host(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Loads configuration from the default location, applying environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Config::load_from(&config_path()?)?;
        if let Some(host) = env::api_host() {
            config.api.host = host;
        }
        Ok(config)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Both application credentials, if configured.
    pub fn client_credentials(&self) -> Option<(&str, &str)> {
        match (&self.application.client_id, &self.application.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Returns the configuration file path.
///
/// Uses `TMV_CONFIG_DIR` when set, otherwise `<config dir>/tmv/`.
pub fn config_path() -> Result<PathBuf> {
    let dir = match env::config_dir() {
        Some(dir) => dir,
        None => dirs::config_dir()
            .ok_or_else(|| Error::Config("cannot determine config directory".into()))?
            .join(APP_DIR_NAME),
    };
    Ok(dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
