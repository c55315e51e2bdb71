// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Timestamp parsing
//!
//! Sensor rows carry their time either as epoch milliseconds or as an
//! ISO-8601 string. All calendar arithmetic downstream is done in UTC.

use crate::error::{GrassError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Naive layouts tried after RFC 3339, interpreted as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A timestamp as it appears in a reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch
    Millis(f64),
    /// ISO-8601 text or a string of epoch milliseconds
    Text(String),
}

impl Timestamp {
    /// Resolve to a UTC date-time
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        match self {
            Timestamp::Millis(ms) => millis_to_datetime(*ms)
                .ok_or_else(|| GrassError::InvalidTimestamp(ms.to_string())),
            Timestamp::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Millis(dt.timestamp_millis() as f64)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Timestamp::Text(text)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{}", ms),
            Timestamp::Text(text) => f.write_str(text),
        }
    }
}

/// Parse an ISO-8601 or epoch-millisecond string
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();
    let invalid = || GrassError::InvalidTimestamp(text.to_string());

    if is_epoch_millis(trimmed) {
        let ms: i64 = trimmed.parse().map_err(|_| invalid())?;
        return Utc.timestamp_millis_opt(ms).single().ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(invalid)
}

fn is_epoch_millis(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn millis_to_datetime(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms.trunc() as i64).single()
}
