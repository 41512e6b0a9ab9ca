//! Ingestion-boundary normalization of upstream records
//!
//! The backend spreads record dates across three possible fields and emits
//! several datetime shapes. Everything is collapsed here into canonical
//! records with a single parsed date, so the aggregation code never sees the
//! upstream inconsistencies. Records without a usable date are dropped, not
//! errors: upstream data quality is not guaranteed.

use chanstats_common::{PublishedVideoRecord, StatRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

/// Engagement snapshot with the upstream date variants collapsed into one
/// canonical field. Metric values are cumulative totals as of `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub date: NaiveDateTime,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// Published-video count normalized to a single canonical date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedCount {
    pub date: NaiveDateTime,
    pub video_count: u64,
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse one of the date shapes the backend emits, timezone-naive.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`
/// (fractional seconds tolerated), with RFC 3339 as a last resort; an
/// offset-carrying value keeps its local wall-clock time.
pub fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.naive_local())
}

/// Normalize raw statistics records, skipping any without a parseable date
pub fn normalize_statistics(records: &[StatRecord]) -> Vec<Snapshot> {
    records
        .iter()
        .filter_map(|record| {
            let date = resolve_date(record.raw_date())?;
            Some(Snapshot {
                date,
                views: record.views.unwrap_or(0),
                likes: record.likes.unwrap_or(0),
                comments: record.comments.unwrap_or(0),
            })
        })
        .collect()
}

/// Normalize raw published-video records, skipping any without a parseable date
pub fn normalize_published(records: &[PublishedVideoRecord]) -> Vec<PublishedCount> {
    records
        .iter()
        .filter_map(|record| {
            let date = resolve_date(record.raw_date())?;
            Some(PublishedCount {
                date,
                video_count: record.video_count.unwrap_or(0),
            })
        })
        .collect()
}

fn resolve_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    let Some(raw) = raw else {
        warn!("skipping record without a date field");
        return None;
    };
    let parsed = parse_record_date(raw);
    if parsed.is_none() {
        warn!(date = raw, "skipping record with unparseable date");
    }
    parsed
}
