//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::MAX_CHART_ROWS;
use crate::models::HoursLayout;
use clap::Parser;
use std::path::PathBuf;

/// ReactorStats - operating-history statistics for a nuclear reactor
///
/// Fetches the yearly operating history from an IAEA PRIS reactor page,
/// computes mean, standard deviation and extrema of the annual time online,
/// and writes a spreadsheet with a column chart.
///
/// Examples:
///   reactorstats
///   reactorstats --url "https://pris.iaea.org/PRIS/CountryStatistics/ReactorDetails.aspx?current=610"
///   reactorstats --layout sorted --chart-rows 50
///   reactorstats --format json -o ginna.json
///   reactorstats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Reactor details page to read the operating history from
    ///
    /// Defaults to R.E. Ginna. Can also be set via REACTORSTATS_URL env var
    /// or .reactorstats.toml config.
    #[arg(long, value_name = "URL", env = "REACTORSTATS_URL")]
    pub url: Option<String>,

    /// Output file path for the report (default: statsproject.xlsx)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (xlsx, json)
    #[arg(long, default_value = "xlsx", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .reactorstats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ordering of the hours column in the report
    ///
    /// "paired" keeps each year next to its own hours; "sorted" lists the
    /// hours in ascending order next to the years in table order.
    #[arg(long, value_name = "LAYOUT")]
    pub layout: Option<HoursLayout>,

    /// Plot this many rows in the chart instead of the number of records
    #[arg(long, value_name = "ROWS")]
    pub chart_rows: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Write an empty report when the page cannot be fetched
    #[arg(long)]
    pub allow_empty: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .reactorstats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook with chart (default)
    #[default]
    Xlsx,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if let Some(rows) = self.chart_rows {
            if rows == 0 || rows > MAX_CHART_ROWS {
                return Err(format!(
                    "Chart rows must be between 1 and {}",
                    MAX_CHART_ROWS
                ));
            }
        }

        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path must not be empty".to_string());
            }
            if output.is_dir() {
                return Err(format!("Output path is a directory: {}", output.display()));
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
