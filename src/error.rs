// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Error types for GrassThink
//!
//! Missing fields and unparseable values inside individual records are not
//! errors: the rule engine substitutes defaults and the aggregator skips the
//! value. Only caller contract violations surface here.

use thiserror::Error;

/// Result type alias for GrassThink operations
pub type Result<T> = std::result::Result<T, GrassError>;

/// Main error type for GrassThink operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrassError {
    /// Parameter name is empty or blank
    #[error("Invalid parameter name: {0:?}")]
    InvalidParameterName(String),

    /// A display point budget must allow at least one point
    #[error("Invalid point budget: {0} (must be at least 1)")]
    InvalidPointBudget(usize),

    /// Range keyword is not one of day, week, month, year
    #[error("Unknown time range: {0:?}")]
    UnknownRange(String),

    /// Timestamp could not be parsed
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for GrassError {
    fn from(err: serde_json::Error) -> Self {
        GrassError::Json(err.to_string())
    }
}
