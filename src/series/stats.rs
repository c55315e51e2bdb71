// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Summary statistics for a series.

use super::{round1, validate_param, AggregatedPoint, Mean};
use crate::error::Result;
use crate::reading::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Min, max, mean and latest value of a series
///
/// All zero for an empty series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStatistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub current: f64,
}

impl SeriesStatistics {
    /// Statistics over bucket values; `current` is the last bucket
    ///
    /// Pass the full bucket series here, not a downsampled one.
    pub fn from_points(points: &[AggregatedPoint]) -> Self {
        Self::from_values(points.iter().map(|p| p.value))
    }

    /// Statistics over the raw parseable values of `param`, in record order
    ///
    /// Every field is rounded to one decimal, as shown next to the chart.
    pub fn from_raw(records: &[HistoryRecord], param: &str) -> Result<Self> {
        validate_param(param)?;
        let stats = Self::from_values(records.iter().filter_map(|r| r.value_of(param)));
        Ok(Self {
            min: round1(stats.min),
            max: round1(stats.max),
            avg: stats.avg,
            current: round1(stats.current),
        })
    }

    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut mean = Mean::default();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut current = 0.0;

        for value in values {
            mean.add(value);
            min = min.min(value);
            max = max.max(value);
            current = value;
        }

        if mean.count() == 0 {
            return Self::default();
        }

        Self {
            min,
            max,
            avg: round1(mean.value()),
            current,
        }
    }
}
