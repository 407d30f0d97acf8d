//! Analysis modules.
//!
//! The ranker orders the hours column and finds its extrema; the aggregator
//! computes mean and standard deviation. Both work on the unsorted hours of a
//! dataset and leave it untouched.

pub mod aggregator;
pub mod ranker;

pub use aggregator::*;
pub use ranker::*;

use crate::error::AnalysisError;
use crate::models::{Dataset, Ranking, Statistics};

/// Run the ranker, then the aggregator, over a dataset's hours.
pub fn analyze(dataset: &Dataset) -> Result<(Ranking, Statistics), AnalysisError> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let ranking = rank_hours(dataset.hours())?;
    let summary = summarize(dataset.hours())?;
    let statistics = Statistics::new(&ranking, &summary);
    Ok((ranking, statistics))
}
