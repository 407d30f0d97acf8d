//! End-to-end statistics pipeline.
//!
//! Stages run strictly in order and hand their results on explicitly:
//! rows → [`Dataset`] → [`Ranking`] + [`Statistics`] → [`Report`].

use crate::analysis;
use crate::error::PipelineError;
use crate::extract::{extract_dataset, ColumnLayout, RowSource};
use crate::models::{Dataset, HoursLayout, Report};
use tracing::{debug, info};

/// Fetch the table and extract its records.
pub async fn fetch_dataset<S: RowSource>(
    source: &S,
    url: &str,
    columns: &ColumnLayout,
) -> Result<Dataset, PipelineError> {
    let rows = source.fetch_rows(url).await?;
    let dataset = extract_dataset(&rows, columns)?;

    for record in dataset.records() {
        debug!("{}: {} h", record.year, record.hours);
    }

    Ok(dataset)
}

/// Run extraction, ranking and aggregation, and assemble the report.
pub async fn run<S: RowSource>(
    source: &S,
    url: &str,
    columns: &ColumnLayout,
    layout: HoursLayout,
) -> Result<Report, PipelineError> {
    let dataset = fetch_dataset(source, url, columns).await?;
    info!("Extracted {} yearly records", dataset.len());

    let (ranking, statistics) = analysis::analyze(&dataset)?;
    info!(
        "Lowest {} h, highest {} h, mean {}, deviation {}",
        statistics.lowest, statistics.highest, statistics.mean, statistics.deviation
    );

    Ok(Report::new(
        url,
        &dataset,
        Some(&ranking),
        Some(statistics),
        layout,
    ))
}
