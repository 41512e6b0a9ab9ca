//! Period bucketing and cumulative-to-incremental series computation

use crate::bucket::BucketKey;
use crate::record::{normalize_published, normalize_statistics, PublishedCount, Snapshot};
use chanstats_common::{Granularity, Metric, PublishedVideoRecord, StatRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

/// Chart-ready output of [`aggregate`]: one label per bucket, with every
/// selected metric's values aligned 1:1 with the labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    /// Period labels, chronologically ascending
    pub labels: Vec<String>,
    /// Per-metric chart values: period-over-period growth for cumulative
    /// metrics, bucketed sums for `video_count`
    pub series: BTreeMap<Metric, Vec<u64>>,
    /// Per-metric pre-delta bucket totals, for tooltip display
    pub raw_totals: BTreeMap<Metric, Vec<u64>>,
}

impl ChartSeries {
    /// Number of visible buckets
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there is anything to chart
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Per-bucket sums of every metric's raw values
#[derive(Debug, Clone, Copy, Default)]
struct BucketTotals {
    views: u64,
    likes: u64,
    comments: u64,
    video_count: u64,
}

impl BucketTotals {
    fn add_snapshot(&mut self, snapshot: &Snapshot) {
        self.views = self.views.saturating_add(snapshot.views);
        self.likes = self.likes.saturating_add(snapshot.likes);
        self.comments = self.comments.saturating_add(snapshot.comments);
    }

    fn add_published(&mut self, published: &PublishedCount) {
        self.video_count = self.video_count.saturating_add(published.video_count);
    }

    fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Views => self.views,
            Metric::Likes => self.likes,
            Metric::Comments => self.comments,
            Metric::VideoCount => self.video_count,
        }
    }
}

/// Aggregate raw statistics into period-bucketed chart series.
///
/// Records from both inputs are normalized, grouped by calendar period at
/// the requested granularity, and summed per bucket. Cumulative metrics
/// (everything except `video_count`) are then converted to period-over-period
/// growth: the first bucket is 0 and decreases between buckets clamp to 0,
/// so counter resets upstream never chart as negative engagement.
/// `raw_totals` keeps the pre-delta bucket sums for tooltip display.
///
/// When `visible_from` is set, deltas are still computed over the full
/// bucket range so the first visible bucket has a correct baseline, but the
/// returned labels and series start at the first bucket on or after the
/// cutoff.
///
/// This is a pure function of its inputs: no I/O, no hidden state, safe to
/// memoize. Empty inputs produce empty labels and empty per-metric series.
#[instrument(skip_all, fields(
    statistics = statistics.len(),
    published = published_video.len(),
    granularity = granularity.as_str(),
))]
pub fn aggregate(
    statistics: &[StatRecord],
    published_video: &[PublishedVideoRecord],
    selected_metrics: &[Metric],
    granularity: Granularity,
    visible_from: Option<NaiveDate>,
) -> ChartSeries {
    let snapshots = normalize_statistics(statistics);
    let published = normalize_published(published_video);

    // The label axis is the union of bucket keys from both inputs.
    let mut buckets: HashMap<BucketKey, BucketTotals> = HashMap::new();
    for snapshot in &snapshots {
        buckets
            .entry(BucketKey::for_datetime(snapshot.date, granularity))
            .or_default()
            .add_snapshot(snapshot);
    }
    for item in &published {
        buckets
            .entry(BucketKey::for_datetime(item.date, granularity))
            .or_default()
            .add_published(item);
    }

    let mut keys: Vec<BucketKey> = buckets.keys().copied().collect();
    keys.sort_unstable();

    // Deltas need the full history; the cutoff only trims what is shown.
    let visible_start = match visible_from {
        Some(cutoff) => keys
            .iter()
            .position(|key| key.start() >= cutoff)
            .unwrap_or(keys.len()),
        None => 0,
    };

    let mut series = BTreeMap::new();
    let mut raw_totals = BTreeMap::new();
    for &metric in selected_metrics {
        let totals: Vec<u64> = keys.iter().map(|key| buckets[key].get(metric)).collect();

        let values: Vec<u64> = if metric.is_cumulative() {
            deltas(metric, &keys, &totals)
        } else {
            totals.clone()
        };

        series.insert(metric, values[visible_start..].to_vec());
        raw_totals.insert(metric, totals[visible_start..].to_vec());
    }

    let labels: Vec<String> = keys[visible_start..].iter().map(BucketKey::label).collect();

    debug!(
        buckets = keys.len(),
        visible = labels.len(),
        "aggregated records into chart series"
    );

    ChartSeries {
        labels,
        series,
        raw_totals,
    }
}

/// Period-over-period growth of a cumulative total, clamped at zero.
///
/// The first bucket has no baseline and is defined as 0. A decrease between
/// buckets means the upstream counter was reset or corrected; it is clamped
/// rather than charted as negative engagement.
fn deltas(metric: Metric, keys: &[BucketKey], totals: &[u64]) -> Vec<u64> {
    totals
        .iter()
        .enumerate()
        .map(|(i, &total)| {
            if i == 0 {
                return 0;
            }
            let previous = totals[i - 1];
            if total < previous {
                warn!(
                    metric = metric.as_str(),
                    bucket = %keys[i].start(),
                    previous,
                    current = total,
                    "cumulative total decreased; clamping delta to zero"
                );
            }
            total.saturating_sub(previous)
        })
        .collect()
}
