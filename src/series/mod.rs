// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Time-series aggregation for charts
//!
//! Turns a sensor's raw history into a display-ready series in two
//! independent passes:
//!
//! 1. [`bucketize`]: average one parameter per time bucket (hour, day,
//!    week of month or month, depending on the [`TimeRange`]).
//! 2. [`downsample`]: thin the buckets to the number of points the chart
//!    has room for.
//!
//! Statistics are always taken from the output of pass 1.
//!
//! ```rust
//! use grassthink::{Aggregator, HistoryRecord, TimeRange};
//!
//! let records: Vec<HistoryRecord> = (1..=7)
//!     .map(|d| {
//!         HistoryRecord::new(format!("2025-02-{:02}T12:00:00Z", d).as_str())
//!             .with_value("temperature", d as f64 * 10.0)
//!     })
//!     .collect();
//!
//! let series = Aggregator::new(10)
//!     .aggregate(&records, "temperature", TimeRange::Week)
//!     .unwrap();
//! assert_eq!(series.points.len(), 7);
//! assert_eq!(series.stats.current, 70.0);
//! ```

mod bucket;
mod downsample;
mod range;
mod stats;
mod window;

pub use bucket::bucketize;
pub use downsample::downsample;
pub use range::{BucketKey, TimeRange};
pub use stats::SeriesStatistics;
pub use window::{sort_chronologically, window};

use crate::error::{GrassError, Result};
use crate::reading::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Chart width taken by one point, in pixels
pub const PIXELS_PER_POINT: u32 = 60;

/// Point budget when none is given (a ~480px chart)
pub const DEFAULT_POINT_BUDGET: usize = 8;

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoint {
    /// Bucket mean, rounded to one decimal
    pub value: f64,
    /// Axis label
    pub label: String,
    /// Label shown on the point itself
    pub display_label: String,
}

/// Display points plus statistics over the full bucket series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: Vec<AggregatedPoint>,
    pub stats: SeriesStatistics,
}

impl Series {
    /// Whether there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Composes bucketing, statistics and downsampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    point_budget: usize,
}

impl Aggregator {
    /// Create an aggregator with a display point budget
    pub fn new(point_budget: usize) -> Self {
        Self { point_budget }
    }

    /// Budget derived from a chart width in pixels (at least one point)
    pub fn for_display_width(width_px: u32) -> Self {
        Self::new(((width_px / PIXELS_PER_POINT) as usize).max(1))
    }

    /// Display point budget
    pub fn point_budget(&self) -> usize {
        self.point_budget
    }

    /// Aggregate `param` over `records` for a chart of the given range
    pub fn aggregate(
        &self,
        records: &[HistoryRecord],
        param: &str,
        range: TimeRange,
    ) -> Result<Series> {
        if self.point_budget == 0 {
            return Err(GrassError::InvalidPointBudget(0));
        }

        let buckets = bucketize(records, param, range)?;
        let stats = SeriesStatistics::from_points(&buckets);
        let points = downsample(&buckets, self.point_budget)?;

        debug!(
            "{} series for {:?}: {} buckets, {} points",
            range,
            param,
            buckets.len(),
            points.len()
        );

        Ok(Series { points, stats })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_POINT_BUDGET)
    }
}

/// Aggregate with an explicit point budget
pub fn aggregate(
    records: &[HistoryRecord],
    param: &str,
    range: TimeRange,
    point_budget: usize,
) -> Result<Series> {
    Aggregator::new(point_budget).aggregate(records, param, range)
}

pub(crate) fn validate_param(param: &str) -> Result<()> {
    if param.trim().is_empty() {
        return Err(GrassError::InvalidParameterName(param.to_string()));
    }
    Ok(())
}

/// Round to one decimal place
///
/// Magnitudes too large to scale are already whole and come back as is.
pub(crate) fn round1(value: f64) -> f64 {
    let scaled = value * 10.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 10.0
}

/// Mean of a stream of finite values
///
/// Uses the plain sum while it stays finite and an incremental mean once it
/// overflows, so finite inputs always give a finite mean.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Mean {
    sum: f64,
    running: f64,
    count: usize,
}

impl Mean {
    pub(crate) fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        let n = self.count as f64;
        self.running += value / n - self.running / n;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn value(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum / self.count as f64
        } else {
            self.running
        }
    }
}
