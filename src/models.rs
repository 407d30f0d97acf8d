//! Data models for the reactor statistics pipeline.
//!
//! This module contains the core data structures passed between the
//! extractor, ranker, aggregator and report stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reporting period from the operating history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearHourRecord {
    /// Calendar year of the reporting period.
    pub year: i32,
    /// Annual time online, in hours.
    pub hours: u32,
}

/// Year and hours columns in source row order.
///
/// Records can only be added as pairs, so `years().len() == hours().len()`
/// always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    years: Vec<i32>,
    hours: Vec<u32>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record, keeping both columns aligned.
    pub fn push(&mut self, record: YearHourRecord) {
        self.years.push(record.year);
        self.hours.push(record.hours);
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Iterates over the records in source row order.
    pub fn records(&self) -> impl Iterator<Item = YearHourRecord> + '_ {
        self.years
            .iter()
            .zip(&self.hours)
            .map(|(&year, &hours)| YearHourRecord { year, hours })
    }
}

impl FromIterator<YearHourRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = YearHourRecord>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for record in iter {
            dataset.push(record);
        }
        dataset
    }
}

/// Result of ranking the hours column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    /// Hours in ascending order.
    pub sorted_hours: Vec<u32>,
    pub lowest: u32,
    pub highest: u32,
}

/// Mean and population standard deviation, rounded to 5 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub deviation: f64,
    pub count: usize,
}

/// Descriptive statistics over the hours column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub lowest: u32,
    pub highest: u32,
    pub mean: f64,
    pub deviation: f64,
    pub count: usize,
}

impl Statistics {
    /// Combines the ranker and aggregator outputs.
    pub fn new(ranking: &Ranking, summary: &Summary) -> Self {
        Self {
            lowest: ranking.lowest,
            highest: ranking.highest,
            mean: summary.mean,
            deviation: summary.deviation,
            count: summary.count,
        }
    }
}

/// How the hours column is ordered in the rendered report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HoursLayout {
    /// Each year stays next to its own hours value (default)
    #[default]
    Paired,
    /// Original-order years next to ascending hours
    Sorted,
}

impl fmt::Display for HoursLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursLayout::Paired => write!(f, "paired"),
            HoursLayout::Sorted => write!(f, "sorted"),
        }
    }
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Page the operating history was read from.
    pub source_url: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of extracted records.
    pub record_count: usize,
    /// Ordering of the hours column.
    pub layout: HoursLayout,
}

/// Everything a renderer needs to produce the output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Year column, in source row order.
    pub years: Vec<i32>,
    /// Hours column, ordered according to `metadata.layout`.
    pub hours: Vec<u32>,
    /// `None` when no data was available.
    pub statistics: Option<Statistics>,
}

impl Report {
    /// Builds a report from the pipeline outputs.
    pub fn new(
        source_url: &str,
        dataset: &Dataset,
        ranking: Option<&Ranking>,
        statistics: Option<Statistics>,
        layout: HoursLayout,
    ) -> Self {
        let hours = match (layout, ranking) {
            (HoursLayout::Sorted, Some(ranking)) => ranking.sorted_hours.clone(),
            _ => dataset.hours().to_vec(),
        };

        Self {
            metadata: ReportMetadata {
                source_url: source_url.to_string(),
                generated_at: Utc::now(),
                record_count: dataset.len(),
                layout,
            },
            years: dataset.years().to_vec(),
            hours,
            statistics,
        }
    }

    /// Creates a report with no records, used when the fetch failed.
    pub fn empty(source_url: &str, layout: HoursLayout) -> Self {
        Self::new(source_url, &Dataset::new(), None, None, layout)
    }
}
