//! Chart dataset shaping for the dashboard's multi-line diagram
//!
//! Maps aggregated series into the per-line structures a renderer consumes:
//! localized display label, line color, chart values and the parallel
//! pre-delta totals the index-mode tooltip shows next to the growth figure.

use crate::aggregate::ChartSeries;
use chanstats_common::Metric;
use serde::Serialize;

/// One renderable line series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    /// Localized display name shown in the legend
    pub label: String,
    /// Chart values, aligned with the axis labels
    pub data: Vec<u64>,
    /// Pre-delta bucket totals, aligned with `data`
    pub original_totals: Vec<u64>,
    /// Line color in the dashboard palette
    pub border_color: String,
}

/// Display label per metric (the dashboard is Russian-language)
fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Views => "Просмотры",
        Metric::Likes => "Лайки",
        Metric::Comments => "Комментарии",
        Metric::VideoCount => "Публикации",
    }
}

/// Line color per metric, matching the dashboard palette
fn metric_color(metric: Metric) -> &'static str {
    match metric {
        Metric::Views => "rgb(75, 192, 192)",
        Metric::Likes => "rgb(255, 99, 132)",
        Metric::Comments => "rgb(255, 206, 86)",
        Metric::VideoCount => "rgb(153, 102, 255)",
    }
}

/// Build renderer-ready datasets for the selected metrics.
///
/// Metrics absent from the aggregated output are skipped, so a selection the
/// aggregator did not compute never produces a dangling dataset.
pub fn build_datasets(chart: &ChartSeries, selected_metrics: &[Metric]) -> Vec<ChartDataset> {
    selected_metrics
        .iter()
        .filter_map(|&metric| {
            let data = chart.series.get(&metric)?;
            let original_totals = chart.raw_totals.get(&metric)?;
            Some(ChartDataset {
                label: metric_label(metric).to_string(),
                data: data.clone(),
                original_totals: original_totals.clone(),
                border_color: metric_color(metric).to_string(),
            })
        })
        .collect()
}
