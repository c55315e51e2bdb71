// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Integration tests for the time-series aggregator.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use grassthink::series::sort_chronologically;
use grassthink::*;
use serde_json::json;

// ============================================================================
// Helper Functions
// ============================================================================

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

fn daily(values: &[f64]) -> Vec<HistoryRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| HistoryRecord::new(start() + Duration::days(i as i64)).with_value("x", *v))
        .collect()
}

fn values(points: &[AggregatedPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

// ============================================================================
// Section 1: Bucketing per range
// ============================================================================

#[test]
fn test_week_of_daily_readings() {
    let records = daily(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    let series = aggregate(&records, "x", TimeRange::Week, 10).unwrap();

    assert_eq!(values(&series.points), vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    assert_eq!(series.points[0].label, "01");
    assert_eq!(series.points[6].display_label, "07 Jan 2025");
    assert_eq!(
        series.stats,
        SeriesStatistics {
            min: 10.0,
            max: 70.0,
            avg: 40.0,
            current: 70.0,
        }
    );
}

#[test]
fn test_day_range_merges_same_hour() {
    let records = vec![
        HistoryRecord::new("2025-02-18T08:10:00Z").with_value("humidity", 60),
        HistoryRecord::new("2025-02-18T08:50:00Z").with_value("humidity", "65"),
        HistoryRecord::new("2025-02-18T14:00:00Z").with_value("humidity", 40.44),
    ];
    let series = Aggregator::new(24).aggregate(&records, "humidity", TimeRange::Day).unwrap();

    assert_eq!(series.points.len(), 2);
    assert_eq!(series.points[0].label, "8:00");
    assert_relative_eq!(series.points[0].value, 62.5);
    assert_relative_eq!(series.points[1].value, 40.4);
    assert_relative_eq!(series.stats.current, 40.4);
}

#[test]
fn test_month_range_buckets_by_week_index() {
    let records: Vec<HistoryRecord> = [(1, 10.0), (5, 20.0), (8, 30.0), (15, 40.0), (29, 50.0)]
        .iter()
        .map(|(day, v)| {
            HistoryRecord::new(format!("2025-03-{:02}T09:00:00Z", day)).with_value("ph", *v)
        })
        .collect();
    let series = aggregate(&records, "ph", TimeRange::Month, 10).unwrap();

    let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["W0", "W1", "W2", "W4"]);
    assert_eq!(values(&series.points), vec![15.0, 30.0, 40.0, 50.0]);
}

#[test]
fn test_year_range_is_chronological_across_years() {
    let records = vec![
        HistoryRecord::new("2026-01-05T00:00:00Z").with_value("t", 3.0),
        HistoryRecord::new("2025-11-20T00:00:00Z").with_value("t", 2.0),
        HistoryRecord::new("2025-02-01T00:00:00Z").with_value("t", 1.0),
        HistoryRecord::new("2025-11-02T00:00:00Z").with_value("t", 4.0),
    ];
    let series = aggregate(&records, "t", TimeRange::Year, 12).unwrap();

    let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Feb", "Nov", "Jan"]);
    assert_eq!(values(&series.points), vec![1.0, 3.0, 3.0]);
    assert_eq!(series.points[2].display_label, "Jan 2026");
    assert_eq!(series.stats.current, 3.0);
}

// ============================================================================
// Section 2: Downsampling vs statistics
// ============================================================================

#[test]
fn test_hundred_days_to_ten_points() {
    let raw: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let records = daily(&raw);
    let series = aggregate(&records, "x", TimeRange::Week, 10).unwrap();

    assert_eq!(series.points.len(), 10);
    for (k, point) in series.points.iter().enumerate() {
        assert_relative_eq!(point.value, k as f64 * 10.0 + 4.5);
    }
    // Label of the sixth bucket in the first run: 2025-01-06
    assert_eq!(series.points[0].label, "06");

    assert_eq!(series.stats.min, 0.0);
    assert_eq!(series.stats.max, 99.0);
    assert_relative_eq!(series.stats.avg, 49.5);
    assert_eq!(series.stats.current, 99.0);
}

#[test]
fn test_stats_ignore_downsampling() {
    let records = daily(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 30.0]);
    let wide = aggregate(&records, "x", TimeRange::Week, 10).unwrap();
    let narrow = aggregate(&records, "x", TimeRange::Week, 2).unwrap();

    assert_eq!(wide.stats, narrow.stats);
    assert_eq!(narrow.stats.max, 30.0);
    assert!(narrow.points.iter().all(|p| p.value < 30.0));
}

#[test]
fn test_budget_from_display_width() {
    let raw: Vec<f64> = (0..30).map(|i| i as f64).collect();
    let series = Aggregator::for_display_width(390)
        .aggregate(&daily(&raw), "x", TimeRange::Month)
        .unwrap();
    // 30 days starting Jan 1st cover week indices W0..W4 of January
    assert!(series.points.len() <= 6);
}

// ============================================================================
// Section 3: Malformed input
// ============================================================================

#[test]
fn test_unparseable_value_excluded_from_bucket() {
    let records = vec![
        HistoryRecord::new("2025-02-18T08:00:00Z").with_value("temperature", "25"),
        HistoryRecord::new("2025-02-18T19:00:00Z").with_value("temperature", "n/a"),
    ];
    let series = aggregate(&records, "temperature", TimeRange::Week, 10).unwrap();
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].value, 25.0);
    assert!(series.points[0].value.is_finite());
}

#[test]
fn test_records_from_json_history() {
    let records: Vec<HistoryRecord> = serde_json::from_value(json!([
        {"timestamp": 1735732800000u64, "temperature": "21.5", "humidity": 50},
        {"timestamp": "2025-01-01T12:30:00Z", "temperature": 22.5},
        {"temperature": 99},
        {"timestamp": true, "temperature": 99}
    ]))
    .unwrap();

    let series = aggregate(&records, "temperature", TimeRange::Day, 5).unwrap();
    assert_eq!(series.points.len(), 1);
    assert_eq!(series.points[0].label, "12:00");
    assert_eq!(series.points[0].value, 22.0);
}

#[test]
fn test_missing_param_everywhere_gives_zero_stats() {
    let records = daily(&[1.0, 2.0]);
    let series = aggregate(&records, "conductivity", TimeRange::Week, 10).unwrap();
    assert!(series.is_empty());
    assert_eq!(series.stats, SeriesStatistics::default());
}

#[test]
fn test_contract_violations() {
    let records = daily(&[1.0]);
    assert!(matches!(
        aggregate(&records, "", TimeRange::Week, 10),
        Err(GrassError::InvalidParameterName(_))
    ));
    assert!(matches!(
        aggregate(&records, "x", TimeRange::Week, 0),
        Err(GrassError::InvalidPointBudget(0))
    ));
}

#[test]
fn test_aggregate_is_idempotent() {
    let records = daily(&[3.3, 1.1, 2.2, 5.5]);
    let a = aggregate(&records, "x", TimeRange::Week, 3).unwrap();
    let b = aggregate(&records, "x", TimeRange::Week, 3).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Section 4: Windowing and raw statistics
// ============================================================================

#[test]
fn test_window_then_aggregate() {
    let raw: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let mut records = daily(&raw);
    records.reverse();

    let now = start() + Duration::days(19);
    let recent = window(&records, TimeRange::Week, now);
    assert_eq!(recent.len(), 8);
    assert_eq!(recent[0].value_of("x"), Some(12.0));

    let series = aggregate(&recent, "x", TimeRange::Week, 10).unwrap();
    assert_eq!(series.stats.current, 19.0);
}

#[test]
fn test_raw_stats_follow_record_order() {
    let mut records = vec![
        HistoryRecord::new("2025-02-18T10:00:00Z").with_value("t", 12.0),
        HistoryRecord::new("2025-02-18T08:00:00Z").with_value("t", 10.0),
        HistoryRecord::new("2025-02-18T09:00:00Z").with_value("t", "bad"),
    ];
    sort_chronologically(&mut records);
    let stats = SeriesStatistics::from_raw(&records, "t").unwrap();
    assert_eq!(stats.current, 12.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.avg, 11.0);
}
