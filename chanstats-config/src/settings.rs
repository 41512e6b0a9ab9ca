//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Statistics backend configuration
    pub api: ApiConfig,

    /// Logging configuration
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Config {
    /// Validate this configuration and all nested sections
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.api.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Statistics backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL, including the API prefix
    #[validate(custom(function = "crate::validation::validate_base_url", message = "Base URL must be a valid http(s) URL"))]
    pub base_url: String,

    /// Bearer token for authenticated requests
    pub auth_token: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Maximum number of retries for failed requests
    #[validate(range(max = 10, message = "Max retries cannot exceed 10"))]
    pub max_retries: u32,

    /// Rate limit in requests per second
    #[validate(range(min = 1, max = 100, message = "Rate limit must be between 1 and 100"))]
    pub rate_limit_per_sec: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            auth_token: None,
            timeout_seconds: 30,
            max_retries: 3,
            rate_limit_per_sec: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (e.g., "info", "debug")
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Unknown log level"))]
    pub level: String,

    /// Whether to use pretty console formatting
    pub pretty: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: true,
            file: None,
        }
    }
}

impl From<&LoggingSettings> for chanstats_common::LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        let format = if settings.pretty {
            chanstats_common::LogFormat::Pretty
        } else {
            chanstats_common::LogFormat::Compact
        };
        Self {
            level: settings.level.clone(),
            format,
            file_path: settings.file.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate_all().is_ok());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            api: ApiConfig {
                base_url: "not a url".to_string(),
                ..ApiConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let config = Config {
            api: ApiConfig {
                timeout_seconds: 0,
                ..ApiConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_logging_settings_conversion() {
        let settings = LoggingSettings {
            level: "debug".to_string(),
            pretty: false,
            file: Some("chanstats.log".to_string()),
        };
        let config: chanstats_common::LoggingConfig = (&settings).into();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, chanstats_common::LogFormat::Compact);
        assert_eq!(config.file_path.as_deref(), Some("chanstats.log"));
    }
}
