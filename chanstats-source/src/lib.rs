//! Statistics backend client for chanstats
//!
//! The dashboard is a thin client over a REST backend; this crate owns that
//! boundary. [`StatisticFilter`] models the query parameters the dashboard
//! sends, [`StatisticSource`] is the fetch interface the aggregation layer
//! consumes, and [`RestStatisticSource`] implements it over HTTP.

pub mod client;
pub mod filter;

pub use client::{RestStatisticSource, SourceConfig, StatisticSource};
pub use filter::StatisticFilter;
