//! Configuration management for chanstats

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{ApiConfig, Config, LoggingSettings};
