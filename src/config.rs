//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.reactorstats.toml` files.

use crate::models::HoursLayout;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".reactorstats.toml";

/// Largest chart range that fits below the header row of a worksheet.
pub const MAX_CHART_ROWS: u32 = 1_048_575;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Render an empty report when no data could be fetched.
    #[serde(default)]
    pub allow_empty: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            allow_empty: false,
        }
    }
}

fn default_output() -> String {
    "statsproject.xlsx".to_string()
}

/// Where and how the operating history is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Reactor details page.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User-Agent header sent with the request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Leading table rows to discard.
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,

    /// 1-based column holding the year.
    #[serde(default = "default_year_column")]
    pub year_column: usize,

    /// 1-based column holding the annual time online.
    #[serde(default = "default_hours_column")]
    pub hours_column: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            skip_rows: default_skip_rows(),
            year_column: default_year_column(),
            hours_column: default_hours_column(),
        }
    }
}

fn default_url() -> String {
    // R.E. Ginna
    "https://pris.iaea.org/PRIS/CountryStatistics/ReactorDetails.aspx?current=609".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("reactorstats/{}", env!("CARGO_PKG_VERSION"))
}

fn default_skip_rows() -> usize {
    1
}

fn default_year_column() -> usize {
    1
}

fn default_hours_column() -> usize {
    4
}

/// Spreadsheet and chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Ordering of the hours column.
    #[serde(default)]
    pub layout: HoursLayout,

    /// Worksheet name.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Chart title.
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_x_axis_name")]
    pub x_axis_name: String,

    #[serde(default = "default_y_axis_name")]
    pub y_axis_name: String,

    #[serde(default = "default_y_axis_min")]
    pub y_axis_min: f64,

    #[serde(default = "default_y_axis_max")]
    pub y_axis_max: f64,

    /// Column border color, as `#RRGGBB`.
    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Column fill color, as `#RRGGBB`.
    #[serde(default = "default_fill_color")]
    pub fill_color: String,

    /// Gap between columns, in percent of column width.
    #[serde(default = "default_gap")]
    pub gap: u16,

    /// Fixed number of chart rows. When unset the chart covers exactly the
    /// extracted records.
    #[serde(default)]
    pub chart_rows: Option<u32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: HoursLayout::default(),
            sheet_name: default_sheet_name(),
            title: default_title(),
            x_axis_name: default_x_axis_name(),
            y_axis_name: default_y_axis_name(),
            y_axis_min: default_y_axis_min(),
            y_axis_max: default_y_axis_max(),
            border_color: default_border_color(),
            fill_color: default_fill_color(),
            gap: default_gap(),
            chart_rows: None,
        }
    }
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_title() -> String {
    "Reactor Time Online per Year".to_string()
}

fn default_x_axis_name() -> String {
    "Frequency".to_string()
}

fn default_y_axis_name() -> String {
    "Hours Online (h/yr)".to_string()
}

fn default_y_axis_min() -> f64 {
    4500.0
}

fn default_y_axis_max() -> f64 {
    11000.0
}

fn default_border_color() -> String {
    "#33658A".to_string()
}

fn default_fill_color() -> String {
    "#86BBD8".to_string()
}

fn default_gap() -> u16 {
    25
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.url {
            self.source.url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(layout) = args.layout {
            self.report.layout = layout;
        }
        if let Some(rows) = args.chart_rows {
            self.report.chart_rows = Some(rows);
        }

        // Flags only ever switch things on
        if args.allow_empty {
            self.general.allow_empty = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let url = &self.source.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("Source URL must start with 'http://' or 'https://': {}", url);
        }

        if self.source.timeout_seconds == 0 {
            bail!("Timeout must be at least 1 second");
        }

        if self.source.year_column == 0 || self.source.hours_column == 0 {
            bail!("Table columns are 1-based; column 0 does not exist");
        }

        if self.report.y_axis_min >= self.report.y_axis_max {
            bail!(
                "Y axis minimum ({}) must be below its maximum ({})",
                self.report.y_axis_min,
                self.report.y_axis_max
            );
        }

        if let Some(rows) = self.report.chart_rows {
            if rows == 0 || rows > MAX_CHART_ROWS {
                bail!("Chart rows must be between 1 and {}, got {}", MAX_CHART_ROWS, rows);
            }
        }

        if self.report.sheet_name.trim().is_empty() {
            bail!("Sheet name must not be empty");
        }

        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "statsproject.xlsx");
        assert!(config.source.url.ends_with("current=609"));
        assert_eq!(config.source.skip_rows, 1);
        assert_eq!(config.source.year_column, 1);
        assert_eq!(config.source.hours_column, 4);
        assert_eq!(config.report.layout, HoursLayout::Paired);
        assert_eq!(config.report.chart_rows, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "ginna.xlsx"
verbose = true

[source]
url = "https://pris.iaea.org/PRIS/CountryStatistics/ReactorDetails.aspx?current=610"
timeout_seconds = 10

[report]
layout = "sorted"
chart_rows = 50
y_axis_min = 0.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "ginna.xlsx");
        assert!(config.general.verbose);
        assert!(config.source.url.ends_with("current=610"));
        assert_eq!(config.source.timeout_seconds, 10);
        assert_eq!(config.source.hours_column, 4);
        assert_eq!(config.report.layout, HoursLayout::Sorted);
        assert_eq!(config.report.chart_rows, Some(50));
        assert_eq!(config.report.y_axis_min, 0.0);
        assert_eq!(config.report.y_axis_max, 11000.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.source.url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.source.hours_column = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.y_axis_min = 12000.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.chart_rows = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_chart_rows_limit() {
        let mut config = Config::default();
        config.report.chart_rows = Some(MAX_CHART_ROWS);
        assert!(config.validate().is_ok());

        config.report.chart_rows = Some(MAX_CHART_ROWS + 1);
        assert!(config.validate().is_err());

        config.report.chart_rows = Some(2_000_000);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.fill_color, "#86BBD8");
    }
}
