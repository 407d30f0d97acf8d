//! Extraction of the operating history table.
//!
//! `table` fetches the page and turns its first table body into text rows;
//! `extractor` turns those rows into an aligned year/hours dataset.

pub mod extractor;
pub mod table;

pub use extractor::{extract_dataset, ColumnLayout};
pub use table::{HttpRowSource, RowSource};
