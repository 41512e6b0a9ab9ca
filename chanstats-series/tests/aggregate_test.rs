//! Integration tests for the aggregation pipeline

use chanstats_common::{Granularity, Metric, PublishedVideoRecord, StatRecord};
use chanstats_series::{aggregate, build_datasets};

fn stat(date: &str, views: u64, likes: u64, comments: u64) -> StatRecord {
    StatRecord {
        date: Some(date.to_string()),
        views: Some(views),
        likes: Some(likes),
        comments: Some(comments),
        ..StatRecord::default()
    }
}

fn published(date: &str, count: u64) -> PublishedVideoRecord {
    PublishedVideoRecord {
        date: Some(date.to_string()),
        video_count: Some(count),
        ..PublishedVideoRecord::default()
    }
}

#[test]
fn test_label_count_matches_distinct_buckets() {
    let statistics = vec![
        stat("2025-03-01", 10, 1, 0),
        stat("2025-03-01 18:00:00", 12, 1, 0),
        stat("2025-03-05", 30, 2, 1),
    ];
    let published = vec![published("2025-03-09", 2)];

    let chart = aggregate(
        &statistics,
        &published,
        &[Metric::Views, Metric::VideoCount],
        Granularity::Day,
        None,
    );

    // Three distinct days across both inputs.
    assert_eq!(chart.labels.len(), 3);
    assert_eq!(chart.series[&Metric::Views].len(), 3);
    assert_eq!(chart.series[&Metric::VideoCount].len(), 3);
}

#[test]
fn test_output_is_independent_of_input_order() {
    let ordered = vec![
        stat("2025-03-01", 10, 0, 0),
        stat("2025-03-02", 25, 0, 0),
        stat("2025-03-03", 40, 0, 0),
    ];
    let mut shuffled = ordered.clone();
    shuffled.swap(0, 2);
    shuffled.swap(1, 2);

    let selected = [Metric::Views];
    let a = aggregate(&ordered, &[], &selected, Granularity::Day, None);
    let b = aggregate(&shuffled, &[], &selected, Granularity::Day, None);

    assert_eq!(a, b);
    assert_eq!(a.labels, vec!["01 мар", "02 мар", "03 мар"]);
}

#[test]
fn test_first_bucket_delta_is_zero() {
    for metric in [Metric::Views, Metric::Likes, Metric::Comments] {
        let statistics = vec![stat("2025-03-01", 100, 50, 25), stat("2025-03-02", 120, 60, 30)];
        let chart = aggregate(&statistics, &[], &[metric], Granularity::Day, None);
        assert_eq!(chart.series[&metric][0], 0, "first delta for {metric}");
    }
}

#[test]
fn test_deltas_never_negative() {
    // Views drop twice (counter reset upstream); deltas clamp to zero.
    let statistics = vec![
        stat("2025-03-01", 500, 0, 0),
        stat("2025-03-02", 400, 0, 0),
        stat("2025-03-03", 450, 0, 0),
        stat("2025-03-04", 100, 0, 0),
    ];

    let chart = aggregate(&statistics, &[], &[Metric::Views], Granularity::Day, None);

    assert_eq!(chart.series[&Metric::Views], vec![0, 0, 50, 0]);
    assert_eq!(chart.raw_totals[&Metric::Views], vec![500, 400, 450, 100]);
}

#[test]
fn test_video_count_is_a_plain_bucket_sum() {
    // Daily publish counts falling into one ISO week sum together and are
    // not converted to deltas.
    let records = vec![
        published("2025-03-03", 2), // Monday
        published("2025-03-05", 1),
        published("2025-03-09", 4), // Sunday, same ISO week
        published("2025-03-10", 3), // next Monday
    ];

    let chart = aggregate(&[], &records, &[Metric::VideoCount], Granularity::Week, None);

    assert_eq!(chart.labels, vec!["03 мар", "10 мар"]);
    assert_eq!(chart.series[&Metric::VideoCount], vec![7, 3]);
}

#[test]
fn test_aggregate_is_idempotent() {
    let statistics = vec![stat("2025-03-01", 10, 2, 1), stat("2025-03-08", 30, 5, 2)];
    let published = vec![published("2025-03-02", 1)];
    let selected = [Metric::Views, Metric::Likes, Metric::VideoCount];

    let first = aggregate(&statistics, &published, &selected, Granularity::Week, None);
    let second = aggregate(&statistics, &published, &selected, Granularity::Week, None);

    assert_eq!(first, second);
}

#[test]
fn test_month_totals_match_summed_day_buckets() {
    let statistics = vec![
        stat("2025-01-05", 100, 0, 0),
        stat("2025-01-20", 150, 0, 0),
        stat("2025-02-03", 175, 0, 0),
        stat("2025-02-28", 400, 0, 0),
    ];
    let selected = [Metric::Views];

    let daily = aggregate(&statistics, &[], &selected, Granularity::Day, None);
    let monthly = aggregate(&statistics, &[], &selected, Granularity::Month, None);

    assert_eq!(monthly.labels, vec!["янв 2025", "фев 2025"]);

    // Each month's pre-delta total equals the sum of that month's day-bucket
    // raw sums.
    let daily_totals = &daily.raw_totals[&Metric::Views];
    assert_eq!(
        monthly.raw_totals[&Metric::Views],
        vec![daily_totals[0] + daily_totals[1], daily_totals[2] + daily_totals[3]],
    );
}

#[test]
fn test_selection_parsing_feeds_aggregation() {
    // A textual selection with an unknown identifier: its series is absent,
    // not an error.
    let selected = Metric::parse_selection(["views", "shares"]);
    let statistics = vec![stat("2025-03-01", 10, 0, 0)];

    let chart = aggregate(&statistics, &[], &selected, Granularity::Day, None);

    assert!(chart.series.contains_key(&Metric::Views));
    assert_eq!(chart.series.len(), 1);
}

#[test]
fn test_backend_payload_roundtrip() {
    // Records exactly as the backend serializes them, including the
    // inconsistent date field naming.
    let payload = r#"[
        {"date": "2025-10-01T10:15:00", "views": 1000, "likes": 80, "comments": 7},
        {"date_published": "2025-10-02", "views": 1200, "likes": 95, "comments": 9},
        {"date_published_from": "2025-10-03 09:00:00", "views": 1180}
    ]"#;
    let statistics: Vec<StatRecord> = serde_json::from_str(payload).unwrap();

    let selected = [Metric::Views, Metric::Likes];
    let chart = aggregate(&statistics, &[], &selected, Granularity::Day, None);

    assert_eq!(chart.labels, vec!["01 окт", "02 окт", "03 окт"]);
    assert_eq!(chart.series[&Metric::Views], vec![0, 200, 0]);
    // Missing likes on the last record counts as zero, which clamps.
    assert_eq!(chart.series[&Metric::Likes], vec![0, 15, 0]);

    let datasets = build_datasets(&chart, &selected);
    assert_eq!(datasets[0].label, "Просмотры");
    assert_eq!(datasets[0].original_totals, vec![1000, 1200, 1180]);
}
