// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Command implementations
//!
//! Each command takes the raw input text and returns the JSON to print, so
//! the commands can be tested without touching stdin or stdout.

use crate::error::{CliError, Result};
use chrono::{DateTime, Utc};
use grassthink::series::sort_chronologically;
use grassthink::{
    window, Aggregator, ControlDecision, Evaluation, HistoryRecord, Reading, RuleEngine, Series,
    TimeRange,
};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Readings as posted to the processing route: a bare array or `{"mergedData": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ReadingsInput {
    Bare(Vec<Reading>),
    Wrapped {
        #[serde(rename = "mergedData")]
        merged_data: Vec<Reading>,
    },
}

/// History as served by the sensor-data route: a bare array or `{"data": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryInput {
    Bare(Vec<HistoryRecord>),
    Wrapped { data: Vec<HistoryRecord> },
}

#[derive(Serialize)]
struct DecisionOutput {
    success: bool,
    actuators: Vec<ControlDecision>,
}

#[derive(Serialize)]
struct SeriesOutput<'a> {
    range: TimeRange,
    param: &'a str,
    #[serde(flatten)]
    series: Series,
}

/// Options for the aggregate command
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub param: String,
    pub range: TimeRange,
    pub aggregator: Aggregator,
    /// Keep only the lookback window ending at this instant
    pub window_end: Option<DateTime<Utc>>,
}

/// Read a file, or stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String> {
    let io_error = |source: std::io::Error| CliError::Io {
        path: path.display().to_string(),
        source,
    };

    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(io_error)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(io_error)
}

/// Evaluate merged readings, one decision per reading
pub fn evaluate(input: &str, explain: bool) -> Result<String> {
    let readings = match serde_json::from_str::<ReadingsInput>(input)? {
        ReadingsInput::Bare(readings) => readings,
        ReadingsInput::Wrapped { merged_data } => merged_data,
    };
    info!("evaluating {} readings", readings.len());

    let engine = RuleEngine::new();
    let output = if explain {
        let evaluations: Vec<Evaluation> = readings.iter().map(|r| engine.explain(r)).collect();
        serde_json::to_string_pretty(&evaluations)?
    } else {
        serde_json::to_string_pretty(&DecisionOutput {
            success: true,
            actuators: engine.evaluate_all(&readings),
        })?
    };
    Ok(output)
}

/// Aggregate a sensor history into chart points
pub fn aggregate(input: &str, options: &AggregateOptions) -> Result<String> {
    let mut records = match serde_json::from_str::<HistoryInput>(input)? {
        HistoryInput::Bare(records) => records,
        HistoryInput::Wrapped { data } => data,
    };

    if let Some(end) = options.window_end {
        records = window(&records, options.range, end);
    } else {
        sort_chronologically(&mut records);
    }
    debug!("{} records after windowing", records.len());

    let series = options
        .aggregator
        .aggregate(&records, &options.param, options.range)?;
    info!(
        "{} {} series: {} points",
        options.range,
        options.param,
        series.points.len()
    );

    Ok(serde_json::to_string_pretty(&SeriesOutput {
        range: options.range,
        param: &options.param,
        series,
    })?)
}
