//! Common types and utilities for the chanstats analytics engine

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ChanStatsError, Result};
pub use logging::{
    init_default_logging, init_dev_logging, init_logging, init_prod_logging, LogFormat,
    LoggingConfig,
};
pub use types::{Granularity, Metric, PublishedVideoRecord, StatRecord};
