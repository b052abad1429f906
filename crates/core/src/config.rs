//! Configuration management
//!
//! This module handles loading and migrating the mcx configuration file.
//! The configuration file is stored in TOML format at ~/.config/mcx/config.toml,
//! or in the directory named by `MCX_CONFIG_DIR`.
//!
//! mcx only reads this file; it never writes it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alias::{self, Alias};
use crate::error::{Error, Result};
use crate::resolve::{AliasExpander, DefaultHostSource};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "MCX_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Configured aliases
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// URL used when a command-line argument is empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            aliases: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a configuration document and check it against the schema
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade mcx.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        if let Some(bad) = config
            .aliases
            .iter()
            .find(|a| !alias::is_valid_alias_name(&a.name))
        {
            return Err(Error::Config(format!(
                "Invalid alias name '{}': use letters, digits, '_' or '-'",
                bad.name
            )));
        }

        Ok(config)
    }
}

impl DefaultHostSource for Config {
    fn default_host(&self) -> Result<Option<String>> {
        Ok(self.defaults.host.clone())
    }
}

impl AliasExpander for Config {
    fn expand(&self, token: &str) -> Result<String> {
        alias::expand(token, &self.aliases)
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("mcx"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version is older, migrates it in memory.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config = Config::from_toml(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config);
        }

        debug!(
            path = %self.config_path.display(),
            aliases = config.aliases.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, mut config: Config) -> Config {
        debug!(from = config.schema_version, to = SCHEMA_VERSION, "migrating config");
        config.schema_version = SCHEMA_VERSION;
        config
    }
}

/// Reads the file on each call, so it is only touched when a default is needed
impl DefaultHostSource for ConfigManager {
    fn default_host(&self) -> Result<Option<String>> {
        Ok(self.load()?.defaults.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(config.defaults.host.is_none());
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(manager.default_host().unwrap().is_none());
    }

    #[test]
    fn test_load_default_host_and_aliases() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [defaults]
            host = "https://s3.example.com"

            [[aliases]]
            name = "s3"
            endpoint = "https://s3.amazonaws.com"
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.aliases[0].name, "s3");
        assert_eq!(
            manager.default_host().unwrap().as_deref(),
            Some("https://s3.example.com")
        );
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_older_schema_is_migrated() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = 0\n").unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = [").unwrap();

        assert!(matches!(manager.load(), Err(Error::TomlParse(_))));
        assert!(matches!(manager.default_host(), Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_unknown_defaults_keys_ignored() {
        let config = Config::from_toml(
            r#"
            schema_version = 1
            [defaults]
            host = "http://localhost:9000"
            output = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_host().unwrap().as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_invalid_alias_name_rejected() {
        let result = Config::from_toml(
            r#"
            schema_version = 1
            [[aliases]]
            name = "my alias"
            endpoint = "http://localhost:9000"
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_as_collaborator() {
        let mut config = Config::default();
        assert!(config.default_host().unwrap().is_none());

        config.defaults.host = Some("http://localhost:9000".into());
        config
            .aliases
            .push(Alias::new("local", "http://localhost:9000"));
        assert_eq!(
            config.default_host().unwrap().as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(
            config.expand("local:bucket/key").unwrap(),
            "http://localhost:9000/bucket/key"
        );
    }
}
