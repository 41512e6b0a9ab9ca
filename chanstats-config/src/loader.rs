//! Configuration loading utilities

use crate::Config;
use chanstats_common::Result as ChanStatsResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for chanstats_common::ChanStatsError {
    fn from(err: ConfigError) -> Self {
        chanstats_common::ChanStatsError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!(path = %path.as_ref().display(), "Loading configuration");
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the conventional locations.
    ///
    /// Tries `CHANSTATS_CONFIG_PATH`, then `config.yaml`/`config.yml` in the
    /// working directory, then defaults with environment overrides.
    pub fn load() -> ChanStatsResult<Config> {
        let config = if let Ok(config_path) = env::var("CHANSTATS_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config).map_err(ConfigError::from)?;
            config.validate_all().map_err(ConfigError::Validation)?;
            config
        };

        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("CHANSTATS_API_URL") {
            config.api.base_url = url;
        }

        if let Ok(token) = env::var("CHANSTATS_API_TOKEN") {
            config.api.auth_token = Some(token);
        }

        if let Ok(timeout) = env::var("CHANSTATS_API_TIMEOUT") {
            config.api.timeout_seconds = timeout.parse().map_err(|e| ConfigError::EnvParse {
                var: "CHANSTATS_API_TIMEOUT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(retries) = env::var("CHANSTATS_MAX_RETRIES") {
            config.api.max_retries = retries.parse().map_err(|e| ConfigError::EnvParse {
                var: "CHANSTATS_MAX_RETRIES".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(rate) = env::var("CHANSTATS_RATE_LIMIT") {
            config.api.rate_limit_per_sec = rate.parse().map_err(|e| ConfigError::EnvParse {
                var: "CHANSTATS_RATE_LIMIT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(level) = env::var("CHANSTATS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("CHANSTATS_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}
