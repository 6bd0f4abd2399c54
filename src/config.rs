//! Configuration file support for tv-browser.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

pub const DEFAULT_CATALOG_BASE: &str = "https://api.tvmaze.com";

/// User configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API
    #[serde(default = "default_catalog_base")]
    pub catalog_base: String,

    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Command used to open episode reference pages (overrides platform default)
    #[serde(default)]
    pub opener: Option<String>,

    /// Additional arguments passed to the opener before the URL
    #[serde(default)]
    pub opener_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_catalog_base() -> String {
    DEFAULT_CATALOG_BASE.to_string()
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            catalog_base: default_catalog_base(),
            request_timeout_secs: None,
            opener: None,
            opener_args: Vec::new(),
        }
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/tv-browser/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("tv-browser");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            return Ok(Self::new());
        }

        Self::from_toml(&fs::read_to_string(&path)?)
    }

    /// Parse a config from TOML text, filling in defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            Self::new().save()?;
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_has_defaults() {
        let config = Config::new();
        assert_eq!(config.catalog_base, "https://api.tvmaze.com");
        assert!(config.request_timeout_secs.is_none());
        assert!(config.opener.is_none());
        assert!(config.opener_args.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            catalog_base: "http://localhost:9000".to_string(),
            request_timeout_secs: Some(10),
            opener: Some("firefox".to_string()),
            opener_args: vec!["--new-tab".to_string()],
        };

        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("catalog_base = \"http://localhost:9000\""));
        assert!(toml_str.contains("request_timeout_secs = 10"));
        assert!(toml_str.contains("opener = \"firefox\""));
        assert!(toml_str.contains("opener_args"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            catalog_base = "http://mirror.local"
            request_timeout_secs = 15
        "#;

        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.catalog_base, "http://mirror.local");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert!(config.opener.is_none());
    }

    #[test]
    fn test_config_partial_deserialization() {
        // Only specify some fields, rest should use defaults
        let config = Config::from_toml("opener = \"xdg-open\"").unwrap();
        assert_eq!(config.opener.as_deref(), Some("xdg-open"));
        assert_eq!(config.catalog_base, DEFAULT_CATALOG_BASE);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_config_invalid_toml() {
        assert!(Config::from_toml("catalog_base = ").is_err());
    }

    #[test]
    fn test_default_config() {
        assert_eq!(Config::default(), Config::new());
    }
}
