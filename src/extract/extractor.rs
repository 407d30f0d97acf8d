//! Conversion of raw table rows into a year/hours dataset.

use super::table::TableRow;
use crate::config::SourceConfig;
use crate::error::DataFormatError;
use crate::models::{Dataset, YearHourRecord};
use std::str::FromStr;
use tracing::debug;

/// Where the data lives in the operating history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Leading rows dropped unconditionally (the partial first year).
    pub skip_rows: usize,
    /// 1-based column holding the year.
    pub year_column: usize,
    /// 1-based column holding the annual time online.
    pub hours_column: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            year_column: 1,
            hours_column: 4,
        }
    }
}

impl From<&SourceConfig> for ColumnLayout {
    fn from(config: &SourceConfig) -> Self {
        Self {
            skip_rows: config.skip_rows,
            year_column: config.year_column,
            hours_column: config.hours_column,
        }
    }
}

/// Build a dataset from table rows, keeping row order.
///
/// The first `skip_rows` rows are discarded by position, whatever they
/// contain. Every remaining row must carry a plain integer year and a
/// non-negative integer hours value.
pub fn extract_dataset(
    rows: &[TableRow],
    layout: &ColumnLayout,
) -> Result<Dataset, DataFormatError> {
    let mut dataset = Dataset::new();

    for (index, row) in rows.iter().enumerate().skip(layout.skip_rows) {
        let year = parse_cell(row, index, layout.year_column)?;
        let hours = parse_cell(row, index, layout.hours_column)?;
        dataset.push(YearHourRecord { year, hours });
    }

    debug!(
        "Extracted {} records ({} rows skipped)",
        dataset.len(),
        rows.len().min(layout.skip_rows)
    );

    Ok(dataset)
}

fn parse_cell<T: FromStr>(
    row: &TableRow,
    index: usize,
    column: usize,
) -> Result<T, DataFormatError> {
    let text = column
        .checked_sub(1)
        .and_then(|i| row.cell(i))
        .ok_or(DataFormatError::MissingCell { row: index, column })?;

    text.trim()
        .parse()
        .map_err(|_| DataFormatError::NotANumber {
            row: index,
            column,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::table::parse_table_rows;

    fn row(year: &str, hours: &str) -> TableRow {
        TableRow::new([year, "2415.91", "490", hours, "74.67"])
    }

    fn header() -> TableRow {
        TableRow::new(["1969", "74.02", "", "", ""])
    }

    #[test]
    fn test_extract_keeps_row_order() {
        let rows = vec![
            header(),
            row("2018", "8400"),
            row("2019", "8760"),
            row("2020", "7900"),
        ];

        let dataset = extract_dataset(&rows, &ColumnLayout::default()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.years(), &[2018, 2019, 2020]);
        assert_eq!(dataset.hours(), &[8400, 8760, 7900]);
    }

    #[test]
    fn test_first_row_dropped_by_position() {
        // A perfectly valid first row is still discarded.
        let rows = vec![row("2017", "8000"), row("2018", "8400")];
        let dataset = extract_dataset(&rows, &ColumnLayout::default()).unwrap();
        assert_eq!(dataset.years(), &[2018]);
    }

    #[test]
    fn test_header_only_gives_empty_dataset() {
        let dataset = extract_dataset(&[header()], &ColumnLayout::default()).unwrap();
        assert!(dataset.is_empty());

        let dataset = extract_dataset(&[], &ColumnLayout::default()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_missing_cell() {
        let rows = vec![header(), TableRow::new(["2018", "1.0"])];
        let err = extract_dataset(&rows, &ColumnLayout::default()).unwrap_err();
        assert_eq!(err, DataFormatError::MissingCell { row: 1, column: 4 });
    }

    #[test]
    fn test_non_numeric_hours() {
        let rows = vec![header(), row("2018", "8,400")];
        let err = extract_dataset(&rows, &ColumnLayout::default()).unwrap_err();
        assert_eq!(
            err,
            DataFormatError::NotANumber {
                row: 1,
                column: 4,
                value: "8,400".to_string()
            }
        );
    }

    #[test]
    fn test_negative_hours_rejected() {
        let rows = vec![header(), row("2018", "-5")];
        let err = extract_dataset(&rows, &ColumnLayout::default()).unwrap_err();
        assert!(matches!(err, DataFormatError::NotANumber { column: 4, .. }));
    }

    #[test]
    fn test_custom_layout() {
        let layout = ColumnLayout {
            skip_rows: 0,
            year_column: 2,
            hours_column: 1,
        };
        let rows = vec![TableRow::new(["8100", "2021"])];
        let dataset = extract_dataset(&rows, &layout).unwrap();
        assert_eq!(dataset.years(), &[2021]);
        assert_eq!(dataset.hours(), &[8100]);
    }

    #[test]
    fn test_extract_from_fixture() {
        let html = include_str!("../../fixtures/ginna_history.html");
        let rows = parse_table_rows(html).unwrap();
        let dataset = extract_dataset(&rows, &ColumnLayout::default()).unwrap();

        assert_eq!(dataset.len(), rows.len() - 1);
        assert_eq!(dataset.years(), &[1970, 1971, 1972, 1973, 1974, 1975]);
        assert_eq!(dataset.hours(), &[6541, 7892, 6977, 7455, 6102, 8004]);
    }
}
