// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! History windowing before aggregation.

use super::range::TimeRange;
use crate::reading::HistoryRecord;
use chrono::{DateTime, Utc};

/// Records inside the lookback window of `range`, oldest first
///
/// Keeps records at or after `now - range.lookback()`. When that cutoff is
/// before the earliest representable time, every record is in the window.
/// Records without a usable timestamp are dropped. Equal timestamps keep
/// their input order.
pub fn window(records: &[HistoryRecord], range: TimeRange, now: DateTime<Utc>) -> Vec<HistoryRecord> {
    let cutoff = now.checked_sub_signed(range.lookback());

    let mut kept: Vec<(DateTime<Utc>, &HistoryRecord)> = records
        .iter()
        .filter_map(|r| r.datetime().map(|dt| (dt, r)))
        .filter(|(dt, _)| cutoff.map_or(true, |c| *dt >= c))
        .collect();
    kept.sort_by_key(|(dt, _)| *dt);

    debug!(
        "{} window from {:?} keeps {} of {} records",
        range,
        cutoff,
        kept.len(),
        records.len()
    );

    kept.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Sort records oldest first, records without a timestamp last
pub fn sort_chronologically(records: &mut [HistoryRecord]) {
    records.sort_by_cached_key(|r| match r.datetime() {
        Some(dt) => (0u8, dt.timestamp_millis()),
        None => (1u8, 0),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;

    fn at(ts: &str, value: f64) -> HistoryRecord {
        HistoryRecord::new(ts).with_value("temperature", value)
    }

    #[test]
    fn test_window_cuts_and_sorts() {
        let now = parse_timestamp("2025-02-18T12:00:00Z").unwrap();
        let records = vec![
            at("2025-02-18T11:00:00Z", 3.0),
            at("2025-02-17T11:59:59Z", 0.0),
            at("2025-02-17T12:00:00Z", 1.0),
            at("2025-02-18T01:00:00Z", 2.0),
            HistoryRecord::default().with_value("temperature", 9.0),
        ];

        let kept = window(&records, TimeRange::Day, now);
        let values: Vec<f64> = kept.iter().filter_map(|r| r.value_of("temperature")).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_longer_range_keeps_more() {
        let now = parse_timestamp("2025-02-18T12:00:00Z").unwrap();
        let records = vec![at("2025-02-01T00:00:00Z", 1.0), at("2025-02-18T00:00:00Z", 2.0)];
        assert_eq!(window(&records, TimeRange::Week, now).len(), 1);
        assert_eq!(window(&records, TimeRange::Month, now).len(), 2);
    }

    #[test]
    fn test_window_cutoff_before_min_time_keeps_all() {
        let records = vec![at("2025-02-18T00:00:00Z", 2.0), at("1970-01-01T00:00:00Z", 1.0)];
        let kept = window(&records, TimeRange::Year, DateTime::<Utc>::MIN_UTC);
        let values: Vec<f64> = kept.iter().filter_map(|r| r.value_of("temperature")).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_sort_chronologically() {
        let mut records = vec![
            HistoryRecord::default().with_value("temperature", 0.0),
            at("2025-02-18T11:00:00Z", 2.0),
            at("2025-02-18T10:00:00Z", 1.0),
        ];
        sort_chronologically(&mut records);
        assert_eq!(records[0].value_of("temperature"), Some(1.0));
        assert_eq!(records[1].value_of("temperature"), Some(2.0));
        assert!(records[2].timestamp.is_none());
    }
}
