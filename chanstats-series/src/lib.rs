//! Time-series aggregation engine for channel statistics
//!
//! Takes the raw engagement snapshots and published-video counts the
//! statistics backend returns, buckets them into day/week/month periods,
//! converts cumulative totals into period-over-period growth, and produces
//! label/series data ready for a line-chart renderer.

pub mod aggregate;
pub mod bucket;
pub mod dataset;
pub mod period;
pub mod record;

pub use aggregate::{aggregate, ChartSeries};
pub use bucket::BucketKey;
pub use dataset::{build_datasets, ChartDataset};
pub use period::{DateRange, PeriodPreset};
pub use record::{parse_record_date, PublishedCount, Snapshot};
