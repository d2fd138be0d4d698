//! Configuration for querybind.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sql::Dialect;
use crate::QueryResult;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "querybind.toml";

/// Main configuration for querybind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Bind and attribute cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// SQL rendering settings.
    #[serde(default)]
    pub sql: SqlConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of bound comparisons kept per thread.
    #[serde(default = "default_capacity")]
    pub bind_capacity: usize,

    /// Maximum number of resolved attributes kept per thread.
    #[serde(default = "default_capacity")]
    pub attribute_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_capacity: default_capacity(),
            attribute_capacity: default_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_capacity() -> usize {
    crate::cache::DEFAULT_CAPACITY
}

/// SQL rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Dialect used when compiling statements.
    #[serde(default)]
    pub dialect: Dialect,
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> QueryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> QueryResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the per-user configuration file, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("querybind").join("config.toml"))
    }

    /// Tries the current directory, then the user config dir, then defaults.
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::load(CONFIG_FILE) {
            return config;
        }
        Self::user_config_path()
            .and_then(|path| Self::load(path).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.bind_capacity, 250);
        assert_eq!(config.sql.dialect, Dialect::Sqlite);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sql]
            dialect = "postgres"

            [cache]
            bind_capacity = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.sql.dialect, Dialect::Postgres);
        assert_eq!(config.cache.bind_capacity, 10);
        assert_eq!(config.cache.attribute_capacity, 250);
        assert_eq!(config.general.log_format, "text");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.cache.enabled = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(!loaded.cache.enabled);
    }
}
