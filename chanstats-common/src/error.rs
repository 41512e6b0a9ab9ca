//! Error types shared across the chanstats workspace

use thiserror::Error;

/// Result type alias for chanstats operations
pub type Result<T> = std::result::Result<T, ChanStatsError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type shared by every chanstats crate
#[derive(Error, Debug)]
pub enum ChanStatsError {
    /// Configuration could not be loaded or is rejected
    #[error("invalid configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// I/O failures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failures: timeouts, refused connections, broken reads
    #[error("transport failure: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The statistics backend answered with a non-success status
    #[error("statistics backend error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },

    /// A payload could not be decoded
    #[error("malformed payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value failed validation
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl ChanStatsError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping an underlying cause
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping an underlying cause
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            message: msg.into(),
            status: None,
            source: None,
        }
    }

    /// Create a backend API error carrying the HTTP status code
    pub fn api_with_status(msg: impl Into<String>, status: u16) -> Self {
        Self::Api {
            message: msg.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error naming the offending field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status carried by a backend API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether a retry could plausibly succeed.
    ///
    /// Transport failures and server-side (5xx) responses are transient;
    /// everything else reflects a request the backend will keep rejecting.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status, .. } => status.map_or(true, |code| code >= 500),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ChanStatsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("request timed out", err)
        } else if err.is_connect() {
            Self::network_with_source("connection failed", err)
        } else if let Some(status) = err.status() {
            Self::Api {
                message: format!("backend returned {status}"),
                status: Some(status.as_u16()),
                source: Some(Box::new(err)),
            }
        } else {
            Self::network_with_source("request failed", err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display() {
        let error = ChanStatsError::config("missing base_url");
        assert_eq!(error.to_string(), "invalid configuration: missing base_url");

        let error = ChanStatsError::api_with_status("server exploded", 500);
        assert_eq!(error.to_string(), "statistics backend error: server exploded");
        assert_eq!(error.status(), Some(500));

        let error = ChanStatsError::validation_field("not a URL", "base_url");
        assert!(error.to_string().contains("validation failed"));
    }

    #[test]
    fn test_source_chain_is_preserved() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = ChanStatsError::config_with_source("could not read config", io_error);

        assert!(wrapped.to_string().contains("could not read config"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ChanStatsError = io_error.into();
        assert!(matches!(error, ChanStatsError::Io(_)));
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error =
            serde_json::from_str::<serde_json::Value>(r#"{"views": not-a-number}"#).unwrap_err();
        let error: ChanStatsError = serde_error.into();
        assert!(matches!(error, ChanStatsError::Serialization(_)));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_retryability() {
        assert!(ChanStatsError::network("timeout").is_retryable());
        assert!(ChanStatsError::api_with_status("bad gateway", 502).is_retryable());
        assert!(ChanStatsError::api("no status").is_retryable());

        assert!(!ChanStatsError::api_with_status("not found", 404).is_retryable());
        assert!(!ChanStatsError::config("bad config").is_retryable());
        assert!(!ChanStatsError::validation("bad value").is_retryable());
    }
}
