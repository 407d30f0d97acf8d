//! Mean and standard deviation of the hours column.
//!
//! Both figures use population formulas (divide by n) and are rounded to
//! five decimals. The deviation is taken about the rounded mean, so it
//! describes the spread around the mean that is reported.

use crate::error::AnalysisError;
use crate::models::Summary;

/// Decimal places kept in reported figures.
pub const DECIMALS: i32 = 5;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Compute mean and population standard deviation.
pub fn summarize(hours: &[u32]) -> Result<Summary, AnalysisError> {
    if hours.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let n = hours.len() as f64;
    let total: f64 = hours.iter().map(|&h| f64::from(h)).sum();
    let mean = round_to(total / n, DECIMALS);

    let squared: f64 = hours
        .iter()
        .map(|&h| (f64::from(h) - mean).powi(2))
        .sum();
    let deviation = (squared / n).sqrt();

    Ok(Summary {
        mean,
        deviation: round_to(deviation, DECIMALS),
        count: hours.len(),
    })
}
