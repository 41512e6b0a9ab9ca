//! Validation helpers for configuration values

use url::Url;
use validator::ValidationError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a backend base URL: must parse and use an http(s) scheme
pub fn validate_base_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("empty_base_url"));
    }

    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(_) => Err(ValidationError::new("unsupported_url_scheme")),
        Err(_) => Err(ValidationError::new("invalid_base_url")),
    }
}

/// Validate a log level name (directive syntax like "chanstats=debug" is
/// accepted as-is and left to the logging filter to interpret)
pub fn validate_log_level(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    if value.contains('=') || LOG_LEVELS.contains(&value.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_log_level"))
    }
}
