//! Configuration management for ClipStash
//!
//! This module handles loading, validating, and saving the TOML
//! configuration file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::clipboard::DEFAULT_POLL_INTERVAL_MS;
use crate::engine::{EngineOptions, MAX_HISTORY_ITEMS};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "CLIPSTASH_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML rendering error
    #[error("Failed to render TOML: {0}")]
    Render(#[from] toml::ser::Error),

    /// Validation error
    #[error("Config validation failed: {0}")]
    Validation(String),

    /// No platform config directory
    #[error("Could not find config directory")]
    NoConfigDir,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Create example folders and snippets on first run
    #[serde(default)]
    pub seed_examples: bool,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Clipboard monitor configuration
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

/// History configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of clipboard items to keep in history
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

/// Clipboard monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Clipboard polling interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("~/.local/share/clipstash/clipstash.db")
}

fn default_max_items() -> usize {
    MAX_HISTORY_ITEMS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            seed_examples: false,
            storage: StorageConfig::default(),
            history: HistoryConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Checks in order:
    /// 1. Path from CLIPSTASH_CONFIG environment variable
    /// 2. <config dir>/clipstash/config.toml
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::expanded_default()),
        }
    }

    /// Load configuration with an optional explicit path.
    ///
    /// An explicit path that does not exist yet yields the defaults, so
    /// `config init` can create it.
    pub fn load_with(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) if path.exists() => Self::load_from_path(path),
            Some(_) => Ok(Self::expanded_default()),
            None => Self::load(),
        }
    }

    fn expanded_default() -> Self {
        let mut config = Self::default();
        config.expand_paths();
        config
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml_str)?;
        config.expand_paths();
        config.validate()?;
        Ok(config)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clipstash").join("config.toml"))
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        Self::default_path().filter(|p| p.exists())
    }

    fn expand_paths(&mut self) {
        self.storage.path = expand_path(&self.storage.path);
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.history.max_items) {
            return Err(ConfigError::Validation(
                "history.max_items must be between 1 and 1000".to_string(),
            ));
        }

        if !(50..=60_000).contains(&self.monitor.poll_interval_ms) {
            return Err(ConfigError::Validation(
                "monitor.poll_interval_ms must be between 50 and 60000".to_string(),
            ));
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Engine settings derived from this configuration
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_history: self.history.max_items,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.poll_interval_ms)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write the commented example configuration to `path`
    pub fn write_example(path: &Path, force: bool) -> Result<(), ConfigError> {
        if !force && path.exists() {
            return Err(ConfigError::Validation(
                "Config file already exists. Use --force to overwrite.".to_string(),
            ));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::generate_example())?;
        Ok(())
    }

    /// Generate example configuration file
    pub fn generate_example() -> String {
        let config = Config::default();

        format!(
            r#"# ClipStash Configuration File
# Location: ~/.config/clipstash/config.toml

# Logging level (trace, debug, info, warn, error)
log_level = "{}"

# Create example folders and snippets on first run
seed_examples = {}

# Storage settings
[storage]
# SQLite database holding history, snippets, categories and folders
path = "{}"

# History settings
[history]
# Number of clipboard items to keep in history
max_items = {}

# Clipboard monitor settings
[monitor]
# How often the clipboard is checked, in milliseconds
poll_interval_ms = {}
"#,
            config.log_level,
            config.seed_examples,
            config.storage.path.display(),
            config.history.max_items,
            config.monitor.poll_interval_ms,
        )
    }
}

/// Expand tilde in path
fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(path_str.as_ref());
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.history.max_items, 50);
        assert_eq!(config.monitor.poll_interval_ms, 500);
        assert!(!config.seed_examples);
    }

    #[test]
    fn test_load_from_toml() {
        let toml_str = r#"
            log_level = "debug"
            seed_examples = true

            [history]
            max_items = 10

            [monitor]
            poll_interval_ms = 250
        "#;

        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.seed_examples);
        assert_eq!(config.history.max_items, 10);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.engine_options().max_history, 10);
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = Config::from_toml("[storage]\npath = \"~/stash.db\"").unwrap();
        assert!(!config.storage.path.to_string_lossy().starts_with('~'));
        assert!(config.storage.path.ends_with("stash.db"));
    }

    #[test]
    fn test_validation_max_items() {
        assert!(Config::from_toml("[history]\nmax_items = 0").is_err());
        assert!(Config::from_toml("[history]\nmax_items = 5000").is_err());
    }

    #[test]
    fn test_validation_poll_interval() {
        let result = Config::from_toml("[monitor]\npoll_interval_ms = 1");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clipstash").join("config.toml");

        let mut config = Config::default();
        config.storage.path = temp_dir.path().join("store.db");
        config.history.max_items = 20;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let config = Config::load_with(Some(&path)).unwrap();
        assert_eq!(config.history.max_items, 50);
        assert!(!config.storage.path.to_string_lossy().starts_with('~'));
        assert!(!path.exists());
    }

    #[test]
    fn test_generate_example_parses() {
        let example = Config::generate_example();
        assert!(example.contains("ClipStash Configuration"));
        assert!(example.contains("max_items = 50"));

        let parsed = Config::from_toml(&example).unwrap();
        assert_eq!(parsed.history.max_items, 50);
    }

    #[test]
    fn test_write_example_respects_force() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        Config::write_example(&path, false).unwrap();
        assert!(Config::write_example(&path, false).is_err());
        Config::write_example(&path, true).unwrap();
    }
}
