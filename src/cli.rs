//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// satviz - chart 3-SAT benchmark results by clause-to-variable ratio
///
/// Reads the JSONL output of a benchmark run (one object per trial with
/// keys n, l, sat and duration), groups trials by L/N ratio, and draws
/// the average solve time and the probability of satisfiability.
///
/// Examples:
///   satviz results.jsonl
///   satviz results.jsonl --format svg -o phase.svg
///   satviz results.jsonl --dry-run
///   satviz --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the JSONL file containing benchmark results
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the charts
    ///
    /// Defaults to the input path with the chart format's extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chart image format (png, svg)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ChartFormat>,

    /// Chart width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .satviz.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "SATVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output (includes a per-ratio table)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and aggregate the records without drawing charts
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .satviz.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Image format for the rendered charts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// PNG bitmap (default)
    #[default]
    Png,
    /// SVG vector image
    Svg,
}

impl ChartFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

/// Smallest chart dimension the layout can fit two labelled panels into.
pub const MIN_CHART_DIMENSION: u32 = 200;

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the input path (empty if unset; validate first).
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() {
            return Err("An input file is required".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        for (name, value) in [("Width", self.width), ("Height", self.height)] {
            if let Some(px) = value {
                if px < MIN_CHART_DIMENSION {
                    return Err(format!(
                        "{} must be at least {} pixels",
                        name, MIN_CHART_DIMENSION
                    ));
                }
            }
        }

        // Never let the chart overwrite the data it was drawn from
        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if same_file(input, output) {
                return Err("Output path must differ from the input path".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Whether two paths name the same file.
///
/// Paths that both resolve are compared canonically, so `./r.jsonl` and
/// `r.jsonl` match; otherwise the spelled paths are compared.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
