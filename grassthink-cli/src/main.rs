// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! # GrassThink CLI
//!
//! Drives the decision and aggregation core from JSON files.
//!
//! ## Usage
//!
//! ```bash
//! # Actuator commands for merged readings
//! grassthink evaluate --input merged.json
//!
//! # Same, with the rules that fired for each reading
//! grassthink evaluate --input merged.json --explain
//!
//! # Weekly temperature chart sized for a 420px screen
//! grassthink aggregate --input history.json --param temperature --range week --width 420
//! ```

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::AggregateOptions;
use grassthink::{Aggregator, TimeRange};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// GrassThink greenhouse decision and aggregation core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute fan/pump/light/roof commands for merged readings
    Evaluate {
        /// JSON file of merged readings ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Include resolved conditions and fired rules
        #[arg(long)]
        explain: bool,
    },

    /// Aggregate a sensor history into chart points and statistics
    Aggregate {
        /// JSON file of history records ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Field to aggregate
        #[arg(short, long)]
        param: String,

        /// Time range: day, week, month, year
        #[arg(short, long, default_value = "week")]
        range: TimeRange,

        /// Maximum number of points
        #[arg(short, long, conflicts_with = "width")]
        budget: Option<usize>,

        /// Chart width in pixels, used to derive the point budget
        #[arg(short, long)]
        width: Option<u32>,

        /// Keep only the range's lookback window ending now
        #[arg(long)]
        recent: bool,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> error::Result<String> {
    match command {
        Command::Evaluate { input, explain } => {
            let text = commands::read_input(&input)?;
            commands::evaluate(&text, explain)
        }
        Command::Aggregate {
            input,
            param,
            range,
            budget,
            width,
            recent,
        } => {
            let aggregator = match (budget, width) {
                (Some(budget), _) => Aggregator::new(budget),
                (None, Some(width)) => Aggregator::for_display_width(width),
                (None, None) => Aggregator::default(),
            };
            let options = AggregateOptions {
                param,
                range,
                aggregator,
                window_end: recent.then(chrono::Utc::now),
            };
            let text = commands::read_input(&input)?;
            commands::aggregate(&text, &options)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("GrassThink CLI v{}", env!("CARGO_PKG_VERSION"));

    match run(args.command) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
