//! Configuration loading from YAML or TOML files with environment overrides.

use crate::schema::{Config, StorageBackend};
use sleep_common::SleepError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "SLEEP_CONFIG_PATH";
/// Environment variable overriding `timezone`.
pub const TIMEZONE_ENV: &str = "SLEEP_TIMEZONE";
/// Environment variable overriding `storage.path`.
pub const STORAGE_PATH_ENV: &str = "SLEEP_STORAGE_PATH";
/// Environment variable overriding `storage.backend` (`sled` or `memory`).
pub const STORAGE_BACKEND_ENV: &str = "SLEEP_STORAGE_BACKEND";

const DEFAULT_FILES: &[&str] = &["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Unsupported file extension.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error.
    #[error("Failed to parse environment variable '{var}': {value}")]
    EnvParse {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// Configuration validation error.
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] SleepError),
}

impl From<ConfigError> for SleepError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(inner) => inner,
            other => Self::Config(other.to_string()),
        }
    }
}

/// Configuration loader for the application.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a configuration file, applies environment overrides and validates the result.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(path, &content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads from `SLEEP_CONFIG_PATH`, then from a default file in the working
    /// directory, and finally falls back to defaults.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_config(path);
        }

        if let Some(path) = DEFAULT_FILES.iter().map(Path::new).find(|path| path.exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses file contents according to the file extension.
    pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(content)?),
            Some("toml") => Ok(toml::from_str(content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Applies `SLEEP_*` environment variable overrides.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(timezone) = env::var(TIMEZONE_ENV) {
            debug!("Overriding timezone from environment: {}", timezone);
            config.timezone = timezone;
        }

        if let Ok(path) = env::var(STORAGE_PATH_ENV) {
            config.storage.path = PathBuf::from(path);
        }

        if let Ok(backend) = env::var(STORAGE_BACKEND_ENV) {
            config.storage.backend = match backend.to_ascii_lowercase().as_str() {
                "sled" => StorageBackend::Sled,
                "memory" => StorageBackend::Memory,
                _ => {
                    return Err(ConfigError::EnvParse {
                        var: STORAGE_BACKEND_ENV,
                        value: backend,
                    })
                }
            };
        }

        Ok(())
    }
}
