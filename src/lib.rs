// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # GrassThink
//!
//! Decision and aggregation core of a greenhouse monitoring system.
//!
//! ## Components
//!
//! - **Actuator rule engine**: maps a merged sensor + weather reading to
//!   on/off commands for the fan, pump, grow light and roof.
//! - **Time-series aggregator**: buckets a sensor's history into
//!   day/week/month/year chart points with min/max/avg/current statistics.
//!
//! Both are pure and synchronous. They take in-memory records and return
//! values; fetching readings and publishing results is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use grassthink::{Reading, RuleEngine};
//!
//! let engine = RuleEngine::new();
//! let reading = Reading::new()
//!     .at("2025-02-18T13:00:00Z")
//!     .with_greenhouse(27.5, 70.0)
//!     .with_weather(31.0, 25.0);
//!
//! let decision = engine.evaluate(&reading);
//! assert!(decision.fan);
//! assert!(decision.roof);
//! ```
//!
//! ## Modules
//!
//! - [`actuator`]: thresholds, rule table and rule engine
//! - [`series`]: bucketing, downsampling and statistics
//! - [`reading`]: input records
//! - [`timestamp`]: timestamp parsing
//! - [`error`]: error types

#[macro_use]
mod macros;

pub mod actuator;
pub mod error;
pub mod reading;
pub mod series;
pub mod timestamp;

// Re-exports for convenient access
pub use actuator::{Band, ControlDecision, Device, Evaluation, RuleEngine, Thresholds};
pub use error::{GrassError, Result};
pub use reading::{HistoryRecord, Reading};
pub use series::{
    aggregate, bucketize, downsample, window, AggregatedPoint, Aggregator, Series,
    SeriesStatistics, TimeRange,
};
pub use timestamp::{parse_timestamp, Timestamp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
