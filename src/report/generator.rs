//! Summary labels and JSON report generation.

use super::ReportRenderer;
use crate::error::RenderError;
use crate::models::{Report, Statistics};
use std::io::Write;
use std::path::Path;

/// Text shown when no statistics could be computed.
const NOT_AVAILABLE: &str = "n/a";

/// Format a figure the way it is shown in summary cells.
///
/// Whole numbers keep one decimal (`8000.0`) so the cell reads as a mean,
/// not a count.
pub fn format_figure(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Label for the mean summary cell.
pub fn mean_label(statistics: Option<&Statistics>) -> String {
    let value = statistics
        .map(|s| format_figure(s.mean))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!("Sample Mean = {}", value)
}

/// Label for the standard deviation summary cell.
pub fn deviation_label(statistics: Option<&Statistics>) -> String {
    let value = statistics
        .map(|s| format_figure(s.deviation))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!("Sample Standard Deviation = {}", value)
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, RenderError> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Writes the report as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report, path: &Path) -> Result<(), RenderError> {
        let content = generate_json_report(report)?;

        let mut file = std::fs::File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, HoursLayout, Ranking, YearHourRecord};

    fn create_test_report() -> Report {
        let dataset: Dataset = [(2018, 8400), (2019, 8760), (2020, 7900)]
            .into_iter()
            .map(|(year, hours)| YearHourRecord { year, hours })
            .collect();
        let ranking = Ranking {
            sorted_hours: vec![7900, 8400, 8760],
            lowest: 7900,
            highest: 8760,
        };
        let statistics = Statistics {
            lowest: 7900,
            highest: 8760,
            mean: 8353.33333,
            deviation: 352.64083,
            count: 3,
        };
        Report::new(
            "https://example.org/reactor",
            &dataset,
            Some(&ranking),
            Some(statistics),
            HoursLayout::Paired,
        )
    }

    #[test]
    fn test_format_figure() {
        assert_eq!(format_figure(8000.0), "8000.0");
        assert_eq!(format_figure(8353.33333), "8353.33333");
        assert_eq!(format_figure(0.8165), "0.8165");
        assert_eq!(format_figure(0.0), "0.0");
    }

    #[test]
    fn test_summary_labels() {
        let report = create_test_report();
        let stats = report.statistics.as_ref();
        assert_eq!(mean_label(stats), "Sample Mean = 8353.33333");
        assert_eq!(
            deviation_label(stats),
            "Sample Standard Deviation = 352.64083"
        );

        assert_eq!(mean_label(None), "Sample Mean = n/a");
        assert_eq!(deviation_label(None), "Sample Standard Deviation = n/a");
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"source_url\""));
        assert!(json.contains("\"record_count\": 3"));
        assert!(json.contains("\"layout\": \"paired\""));
        assert!(json.contains("\"statistics\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["years"][0], 2018);
        assert_eq!(value["hours"][2], 7900);
        assert_eq!(value["statistics"]["highest"], 8760);
    }

    #[test]
    fn test_json_renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        JsonRenderer.render(&create_test_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Report = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.years, vec![2018, 2019, 2020]);
        assert_eq!(parsed.statistics.map(|s| s.lowest), Some(7900));
    }
}
