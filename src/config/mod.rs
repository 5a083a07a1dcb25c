//
//  scribe-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the CLI settings as TOML in the platform config directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/scribe/config.toml`
//! - **macOS**: `~/Library/Application Support/scribe/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\scribe\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://scribe.example.com"
//! timeout_secs = 30
//! upload_timeout_secs = 300
//!
//! [core]
//! output = "table"
//! ```
//!
//! ## Precedence
//!
//! `--base-url` flag, then `SCRIBE_BASE_URL`, then the file, then defaults.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scribe_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("api.base_url", "https://scribe.example.com")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod hosts;

pub use hosts::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::transport::parse_base_url;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "api.upload_timeout_secs",
    "core.output",
];

/// Top-level configuration.
///
/// All sections use `#[serde(default)]` so partial files load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub core: CoreConfig,
}

/// Connection settings for the Scribe backend.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | `http://localhost:8000` |
/// | `timeout_secs` | `30` |
/// | `upload_timeout_secs` | `300` |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Origin the API lives under. Path prefixes are discovered, not configured.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Applies to OCR and transcription uploads.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_upload_timeout_secs() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    /// The keyring key for this backend.
    pub fn host(&self) -> String {
        normalize_host(&self.base_url)
    }
}

/// Output and interaction preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// `table` or `json`
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_output() -> String {
    "table".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies the environment and command-line overrides for the base URL.
    ///
    /// `flag` wins over `SCRIBE_BASE_URL`; both win over the file.
    pub fn with_overrides(mut self, flag: Option<&str>) -> Self {
        let env = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
        if let Some(base_url) = flag.map(str::to_string).or(env) {
            self.api.base_url = base_url;
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "api.upload_timeout_secs" => Some(self.api.upload_timeout_secs.to_string()),
            "core.output" => Some(self.core.output.clone()),
            _ => None,
        }
    }

    /// Sets a value by key, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                parse_base_url(value)?;
                self.api.base_url = value.trim().trim_end_matches('/').to_string();
            }
            "api.timeout_secs" => self.api.timeout_secs = parse_secs(key, value)?,
            "api.upload_timeout_secs" => self.api.upload_timeout_secs = parse_secs(key, value)?,
            "core.output" => match value {
                "table" | "json" => self.core.output = value.to_string(),
                _ => bail!("core.output must be 'table' or 'json', got '{}'", value),
            },
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => bail!("{} must be a positive number of seconds, got '{}'", key, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.api.upload_timeout(), Duration::from_secs(300));
        assert_eq!(config.core.output, "table");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config =
            toml::from_str("[api]\nbase_url = \"https://s.example.com\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://s.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.core.output, "table");
    }

    #[test]
    fn test_set_validates() {
        let mut config = Config::default();

        config.set("api.base_url", "https://scribe.example.com/").unwrap();
        assert_eq!(config.get("api.base_url").unwrap(), "https://scribe.example.com");

        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("api.timeout_secs", "0").is_err());
        assert!(config.set("core.output", "yaml").is_err());
        assert!(config.set("core.editor", "vim").is_err());

        config.set("api.upload_timeout_secs", "600").unwrap();
        assert_eq!(config.api.upload_timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("core.output", "json").unwrap();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert_eq!(
            Config::load_from(&dir.path().join("missing.toml")).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_flag_override_wins() {
        let config = Config::default().with_overrides(Some("https://flag.example.com"));
        assert_eq!(config.api.base_url, "https://flag.example.com");
    }
}
