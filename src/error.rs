//! Error types for each pipeline stage.

use thiserror::Error;

/// Failure while retrieving the statistics page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or other transport failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("HTTP error {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read.
    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The fetched table does not have the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataFormatError {
    #[error("No table body found in the page")]
    MissingTable,

    /// `row` is the index in the fetched table, `column` is 1-based.
    #[error("Row {row} has no cell {column}")]
    MissingCell { row: usize, column: usize },

    #[error("Row {row}, cell {column}: {value:?} is not a valid number")]
    NotANumber {
        row: usize,
        column: usize,
        value: String,
    },
}

/// Failure in the ranker or aggregator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Dataset is empty, no statistics can be computed")]
    EmptyDataset,
}

/// Failure while writing the output document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any error that stops the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
