// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! First pass: group raw records into time buckets.

use super::range::{BucketKey, TimeRange};
use super::{round1, validate_param, AggregatedPoint, Mean};
use crate::error::Result;
use crate::reading::HistoryRecord;
use std::collections::BTreeMap;

/// Average `param` per time bucket
///
/// Buckets are created only by parseable values, so none is ever empty.
/// Records with no usable timestamp or value are skipped. The result is in
/// ascending chronological order.
pub fn bucketize(
    records: &[HistoryRecord],
    param: &str,
    range: TimeRange,
) -> Result<Vec<AggregatedPoint>> {
    validate_param(param)?;

    let mut buckets: BTreeMap<BucketKey, Mean> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(dt) = record.datetime() else {
            skipped += 1;
            continue;
        };
        let Some(value) = record.value_of(param) else {
            skipped += 1;
            continue;
        };
        buckets.entry(range.bucket_key(&dt)).or_default().add(value);
    }

    if skipped > 0 {
        debug!(
            "skipped {} of {} records without a usable timestamp or {:?}",
            skipped,
            records.len(),
            param
        );
    }

    Ok(buckets
        .iter()
        .map(|(key, mean)| AggregatedPoint {
            value: round1(mean.value()),
            label: range.label(key),
            display_label: range.display_label(key),
        })
        .collect())
}
