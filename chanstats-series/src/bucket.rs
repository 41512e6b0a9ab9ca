//! Calendar-period bucket keys and axis label formatting

use chanstats_common::Granularity;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Short Russian month names used by the dashboard chart axis
const MONTHS_SHORT_RU: [&str; 12] = [
    "янв", "фев", "мар", "апр", "май", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// Canonical identifier for the calendar period a timestamp falls into.
///
/// The key is the period's start date: the date itself for day buckets, the
/// ISO week's Monday for week buckets (Sunday counts as day 7 of the previous
/// week), and the first of the month for month buckets. Ordering keys by
/// start date therefore gives calendar-chronological order; a month key
/// compares as `YYYY-MM-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    start: NaiveDate,
    granularity: Granularity,
}

impl BucketKey {
    /// Bucket key for a calendar date at the given granularity
    pub fn for_date(date: NaiveDate, granularity: Granularity) -> Self {
        let start = match granularity {
            Granularity::Day => date,
            Granularity::Week => week_monday(date),
            Granularity::Month => date.with_day(1).unwrap_or(date),
        };
        Self { start, granularity }
    }

    /// Bucket key for a timestamp at the given granularity
    pub fn for_datetime(timestamp: NaiveDateTime, granularity: Granularity) -> Self {
        Self::for_date(timestamp.date(), granularity)
    }

    /// Start date of the period this key represents
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Granularity this key was derived at
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Human-readable axis label: `"17 окт"` for day and week buckets,
    /// `"окт 2025"` for month buckets. Deterministic per key.
    pub fn label(&self) -> String {
        let month = MONTHS_SHORT_RU[self.start.month0() as usize];
        match self.granularity {
            Granularity::Day | Granularity::Week => {
                format!("{:02} {}", self.start.day(), month)
            }
            Granularity::Month => format!("{} {}", month, self.start.year()),
        }
    }
}

/// Monday starting the ISO week that contains `date`
fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
