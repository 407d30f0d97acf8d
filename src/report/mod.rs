//! Report rendering.
//!
//! Renderers turn a [`Report`] into an output document. The spreadsheet
//! renderer writes the workbook with its chart; the JSON renderer writes a
//! machine-readable copy of the same data.

pub mod generator;
pub mod spreadsheet;

pub use generator::JsonRenderer;
pub use spreadsheet::{ChartSettings, XlsxRenderer};

use crate::error::RenderError;
use crate::models::Report;
use std::path::Path;

/// Anything that can write a report to disk.
pub trait ReportRenderer {
    fn render(&self, report: &Report, path: &Path) -> Result<(), RenderError>;
}
