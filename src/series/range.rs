// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Chart time ranges and their bucket keys.

use crate::error::{GrassError, Result};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Chart time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// One point per hour of day
    Day,
    /// One point per calendar date
    Week,
    /// One point per week of the month
    Month,
    /// One point per calendar month
    Year,
}

impl TimeRange {
    /// All ranges, shortest first
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Year,
    ];

    /// Range keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    /// How far back the sensor-data history reaches for this range
    pub fn lookback(&self) -> Duration {
        match self {
            TimeRange::Day => Duration::hours(24),
            TimeRange::Week => Duration::days(7),
            TimeRange::Month => Duration::days(30),
            TimeRange::Year => Duration::days(365),
        }
    }

    /// Bucket a timestamp falls into
    pub fn bucket_key(&self, dt: &DateTime<Utc>) -> BucketKey {
        match self {
            TimeRange::Day => BucketKey {
                year: 0,
                month: 0,
                slot: 0,
                hour: dt.hour(),
            },
            TimeRange::Week => BucketKey {
                year: dt.year(),
                month: dt.month(),
                slot: dt.day(),
                hour: 0,
            },
            TimeRange::Month => BucketKey {
                year: dt.year(),
                month: dt.month(),
                slot: dt.day() / 7,
                hour: 0,
            },
            TimeRange::Year => BucketKey {
                year: dt.year(),
                month: dt.month(),
                slot: 0,
                hour: 0,
            },
        }
    }

    /// Short axis label for a bucket
    pub fn label(&self, key: &BucketKey) -> String {
        match self {
            TimeRange::Day => format!("{}:00", key.hour),
            TimeRange::Week => format!("{:02}", key.slot),
            TimeRange::Month => format!("W{}", key.slot),
            TimeRange::Year => month_abbreviation(key.month).to_string(),
        }
    }

    /// Longer label shown on the data point
    pub fn display_label(&self, key: &BucketKey) -> String {
        match self {
            TimeRange::Day => format!("{}:00", key.hour),
            TimeRange::Week => format!(
                "{:02} {} {}",
                key.slot,
                month_abbreviation(key.month),
                key.year
            ),
            TimeRange::Month => format!(
                "W{} {} {}",
                key.slot,
                month_abbreviation(key.month),
                key.year
            ),
            TimeRange::Year => format!("{} {}", month_abbreviation(key.month), key.year),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = GrassError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(GrassError::UnknownRange(s.to_string())),
        }
    }
}

/// Chronologically ordered bucket identity
///
/// Fields compare in declaration order, so the derived ordering is
/// chronological within a range. Unused fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub year: i32,
    pub month: u32,
    /// Day of month (week range) or week-of-month index (month range)
    pub slot: u32,
    pub hour: u32,
}

fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}
