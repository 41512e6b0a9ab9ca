//! Domain types shared across the chanstats workspace

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Engagement metric identifiers selectable on the dashboard chart.
///
/// All metrics except `video_count` are cumulative counters (running totals
/// as of the record's date); `video_count` is an instantaneous per-period
/// count and is never converted to a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Views,
    Likes,
    Comments,
    VideoCount,
}

impl Metric {
    /// All known metrics, in display order
    pub const ALL: [Metric; 4] = [
        Metric::Views,
        Metric::Likes,
        Metric::Comments,
        Metric::VideoCount,
    ];

    /// Wire identifier of this metric
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Likes => "likes",
            Metric::Comments => "comments",
            Metric::VideoCount => "video_count",
        }
    }

    /// Parse a wire identifier; unknown identifiers yield `None`
    pub fn parse(id: &str) -> Option<Metric> {
        match id {
            "views" => Some(Metric::Views),
            "likes" => Some(Metric::Likes),
            "comments" => Some(Metric::Comments),
            "video_count" => Some(Metric::VideoCount),
            _ => None,
        }
    }

    /// Parse a textual metric selection, dropping unrecognized identifiers.
    ///
    /// Unknown identifiers are not an error: their series is simply absent
    /// from the aggregated output.
    pub fn parse_selection<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<Metric> {
        let mut selected = Vec::new();
        for id in ids {
            match Metric::parse(id) {
                Some(metric) if !selected.contains(&metric) => selected.push(metric),
                Some(_) => {}
                None => warn!(metric = id, "ignoring unrecognized metric identifier"),
            }
        }
        selected
    }

    /// Whether this metric is a running total that must be charted as a
    /// period-over-period delta
    pub fn is_cumulative(self) -> bool {
        !matches!(self, Metric::VideoCount)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart bucket granularity selected by the dashboard toggle
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Wire identifier of this granularity
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

/// Raw cumulative engagement snapshot as returned by the statistics backend.
///
/// The backend is inconsistent about which field carries the record date, so
/// all three variants are kept here; [`StatRecord::raw_date`] resolves them
/// in priority order. Records arrive unsorted and may share dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub date: Option<String>,
    pub date_published: Option<String>,
    pub date_published_from: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
}

impl StatRecord {
    /// Record date under the upstream fallback chain:
    /// `date`, then `date_published`, then `date_published_from`.
    pub fn raw_date(&self) -> Option<&str> {
        self.date
            .as_deref()
            .or(self.date_published.as_deref())
            .or(self.date_published_from.as_deref())
    }
}

/// Count of videos published in a period, as returned by the backend.
///
/// Unlike [`StatRecord`] metrics this is an instantaneous quantity, not a
/// running total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVideoRecord {
    pub date: Option<String>,
    pub date_published: Option<String>,
    pub date_published_from: Option<String>,
    pub video_count: Option<u64>,
}

impl PublishedVideoRecord {
    /// Record date under the same fallback chain as [`StatRecord::raw_date`]
    pub fn raw_date(&self) -> Option<&str> {
        self.date
            .as_deref()
            .or(self.date_published.as_deref())
            .or(self.date_published_from.as_deref())
    }
}
