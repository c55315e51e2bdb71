// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Error types for the command-line driver

use thiserror::Error;

/// Errors surfaced to the command line
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be read
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input is not the expected JSON shape
    #[error("Invalid input JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the core library
    #[error(transparent)]
    Core(#[from] grassthink::GrassError),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
