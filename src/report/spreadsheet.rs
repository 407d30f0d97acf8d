//! Excel workbook generation.
//!
//! Layout of the single worksheet:
//!
//! ```text
//!      A        B                         C                                 D
//!  1   Years    Annual Time Online (h)    Sample Mean = ...                 [chart]
//!  2   1970     6541                      Sample Standard Deviation = ...
//!  3   1971     7892
//! ```

use super::generator::{deviation_label, mean_label};
use super::ReportRenderer;
use crate::config::{ReportConfig, MAX_CHART_ROWS};
use crate::error::RenderError;
use crate::models::Report;
use rust_xlsxwriter::{
    Chart, ChartFont, ChartFormat, ChartLine, ChartSolidFill, ChartType, Workbook, Worksheet,
};
use std::path::Path;
use tracing::debug;

const YEAR_HEADER: &str = "Years";
const HOURS_HEADER: &str = "Annual Time Online (h)";

const YEAR_COLUMN: u16 = 0;
const HOURS_COLUMN: u16 = 1;
const SUMMARY_COLUMN: u16 = 2;
const CHART_COLUMN: u16 = 3;

/// First data row (0-based), right below the headers.
const FIRST_DATA_ROW: u32 = 1;

const DATA_COLUMN_WIDTH: f64 = 20.0;
const SUMMARY_COLUMN_WIDTH: f64 = 40.0;

/// Default chart size in pixels, before scaling.
const CHART_WIDTH: u32 = 480;
const CHART_HEIGHT: u32 = 288;
const CHART_SCALE: u32 = 2;

/// Chart appearance and range settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub sheet_name: String,
    pub title: String,
    pub x_axis_name: String,
    pub y_axis_name: String,
    pub y_axis_min: f64,
    pub y_axis_max: f64,
    pub border_color: String,
    pub fill_color: String,
    pub gap: u16,
    /// Fixed row count; `None` plots exactly the records present.
    pub fixed_rows: Option<u32>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ChartSettings {
    fn from(config: &ReportConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            title: config.title.clone(),
            x_axis_name: config.x_axis_name.clone(),
            y_axis_name: config.y_axis_name.clone(),
            y_axis_min: config.y_axis_min,
            y_axis_max: config.y_axis_max,
            border_color: config.border_color.clone(),
            fill_color: config.fill_color.clone(),
            gap: config.gap,
            fixed_rows: config.chart_rows,
        }
    }
}

impl ChartSettings {
    /// Number of worksheet rows the chart series covers.
    ///
    /// Returns `None` when there is nothing to plot or the range would run
    /// past the last worksheet row.
    pub fn plotted_rows(&self, record_count: usize) -> Option<u32> {
        let rows = match self.fixed_rows {
            Some(rows) => rows,
            None => u32::try_from(record_count).ok()?,
        };
        Some(rows).filter(|&rows| rows > 0 && rows <= MAX_CHART_ROWS)
    }

    /// Last 0-based worksheet row of the chart series.
    pub fn last_row(&self, record_count: usize) -> Option<u32> {
        self.plotted_rows(record_count)
            .and_then(|rows| FIRST_DATA_ROW.checked_add(rows - 1))
    }
}

/// Writes the report as an `.xlsx` workbook with an embedded column chart.
#[derive(Debug, Clone, Default)]
pub struct XlsxRenderer {
    settings: ChartSettings,
}

impl XlsxRenderer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    /// Build the workbook in memory.
    pub fn build_workbook(&self, report: &Report) -> Result<Workbook, RenderError> {
        let mut workbook = Workbook::new();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&self.settings.sheet_name)?;

            write_columns(worksheet, report)?;
            write_summary(worksheet, report)?;

            match self.settings.last_row(report.years.len()) {
                Some(last_row) => {
                    let chart = self.build_chart(last_row);
                    worksheet.insert_chart(0, CHART_COLUMN, &chart)?;
                }
                None => debug!("No records to plot, chart omitted"),
            }
        }

        Ok(workbook)
    }

    fn build_chart(&self, last_row: u32) -> Chart {
        let settings = &self.settings;
        let sheet = settings.sheet_name.as_str();
        let mut chart = Chart::new(ChartType::Column);

        chart
            .title()
            .set_name(&settings.title)
            .set_font(ChartFont::new().set_size(32).set_bold());

        chart.legend().set_hidden();

        chart
            .x_axis()
            .set_name(&settings.x_axis_name)
            .set_name_font(ChartFont::new().set_size(24).unset_bold())
            .set_font(ChartFont::new().set_size(16).set_italic());

        chart
            .y_axis()
            .set_name(&settings.y_axis_name)
            .set_name_font(ChartFont::new().set_size(24).unset_bold())
            .set_font(ChartFont::new().set_size(16))
            .set_min(settings.y_axis_min)
            .set_max(settings.y_axis_max);

        chart
            .add_series()
            .set_categories((sheet, FIRST_DATA_ROW, YEAR_COLUMN, last_row, YEAR_COLUMN))
            .set_values((sheet, FIRST_DATA_ROW, HOURS_COLUMN, last_row, HOURS_COLUMN))
            .set_format(
                ChartFormat::new()
                    .set_border(ChartLine::new().set_color(settings.border_color.as_str()))
                    .set_solid_fill(ChartSolidFill::new().set_color(settings.fill_color.as_str())),
            )
            .set_gap(settings.gap);

        chart.set_width(CHART_WIDTH * CHART_SCALE);
        chart.set_height(CHART_HEIGHT * CHART_SCALE);

        chart
    }
}

impl ReportRenderer for XlsxRenderer {
    fn render(&self, report: &Report, path: &Path) -> Result<(), RenderError> {
        let mut workbook = self.build_workbook(report)?;
        workbook.save(path)?;
        debug!("Workbook written to {}", path.display());
        Ok(())
    }
}

/// Headers in row 1, years and hours from row 2 downward.
fn write_columns(worksheet: &mut Worksheet, report: &Report) -> Result<(), RenderError> {
    worksheet.write_string(0, YEAR_COLUMN, YEAR_HEADER)?;
    worksheet.write_string(0, HOURS_COLUMN, HOURS_HEADER)?;
    worksheet.set_column_width(YEAR_COLUMN, DATA_COLUMN_WIDTH)?;
    worksheet.set_column_width(HOURS_COLUMN, DATA_COLUMN_WIDTH)?;

    for (row, &year) in (FIRST_DATA_ROW..).zip(&report.years) {
        worksheet.write_number(row, YEAR_COLUMN, year)?;
    }
    for (row, &hours) in (FIRST_DATA_ROW..).zip(&report.hours) {
        worksheet.write_number(row, HOURS_COLUMN, hours)?;
    }

    Ok(())
}

/// Mean in C1, standard deviation in C2.
fn write_summary(worksheet: &mut Worksheet, report: &Report) -> Result<(), RenderError> {
    let statistics = report.statistics.as_ref();
    worksheet.write_string(0, SUMMARY_COLUMN, mean_label(statistics))?;
    worksheet.write_string(1, SUMMARY_COLUMN, deviation_label(statistics))?;
    worksheet.set_column_width(SUMMARY_COLUMN, SUMMARY_COLUMN_WIDTH)?;
    Ok(())
}
