//! # Configuration
//!
//! Guildbook reads an optional TOML file (default `guildbook.toml`) that says
//! where the guild data lives, where the web page goes, and how chatty the
//! logs are. A missing file is not an error: every value has a default.
//!
//! ```toml
//! [storage]
//! data_file = "guild_data.json"
//!
//! [web]
//! output_file = "guild_page.html"
//!
//! [logging]
//! level = "warn"
//! # file = "guildbook.log"
//! ```
//!
//! Command-line flags win over the file (`--data` replaces `storage.data_file`,
//! `-v` raises the log level).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding the whole guild.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    "guild_data.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Default destination for `guildbook web` and the menu's page generator.
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_output_file() -> String {
    "guild_page.html".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown strings fall back to `warn`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.trim().parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Config::default());
        }
        Self::load(path)
    }

    /// Create a default configuration file, refusing to overwrite one.
    pub fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(anyhow!("Config file {} already exists", path));
            }
            Err(e) => return Err(anyhow!("Failed to write config file {}: {}", path, e)),
        };
        use std::io::Write;
        file.write_all(content.as_bytes())
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[web]\noutput_file = \"site/index.html\"\n").unwrap();
        assert_eq!(config.web.output_file, "site/index.html");
        assert_eq!(config.storage.data_file, "guild_data.json");
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_level_filter_parsing() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
        logging.level = "DEBUG".to_string();
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        logging.level = "loud".to_string();
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.data_file, "guild_data.json");
    }

    #[test]
    fn test_create_default_round_trip_and_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guildbook.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).unwrap();

        let loaded = Config::load(path).unwrap();
        assert_eq!(loaded.web.output_file, "guild_page.html");
        assert!(Config::create_default(path).is_err());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[storage\n").unwrap();
        assert!(Config::load_or_default(path.to_str().unwrap()).is_err());
    }
}
