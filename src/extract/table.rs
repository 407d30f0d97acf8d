//! HTML table retrieval.
//!
//! This module downloads the reactor statistics page and reads the rows of
//! its first `<tbody>` as plain text cells.

use crate::config::SourceConfig;
use crate::error::{DataFormatError, FetchError, PipelineError};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

static TBODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody").expect("static selector is valid"));

/// Text cells of one `<tr>`, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    #[cfg(test)]
    pub fn new<S: Into<String>>(cells: impl IntoIterator<Item = S>) -> Self {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the cell at a 0-based index.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    fn from_element(row: ElementRef<'_>) -> Self {
        let cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| matches!(cell.value().name(), "td" | "th"))
            .map(|cell| normalize_text(cell.text()))
            .collect();
        Self { cells }
    }
}

/// Anything that can produce the rows of the operating history table.
pub trait RowSource {
    /// Fetches the table rows found at `url`, header row included.
    async fn fetch_rows(&self, url: &str) -> Result<Vec<TableRow>, PipelineError>;
}

/// Row source backed by a single HTTP GET.
pub struct HttpRowSource {
    client: reqwest::Client,
    show_progress: bool,
}

impl HttpRowSource {
    /// Create a row source using the timeout and user agent from `config`.
    pub fn new(config: &SourceConfig, show_progress: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    /// Download the page body. No retries.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap(),
            );
            pb.set_message(format!("Fetching {}", url));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = self.get_body(url).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        result
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}

impl RowSource for HttpRowSource {
    async fn fetch_rows(&self, url: &str) -> Result<Vec<TableRow>, PipelineError> {
        info!("Fetching operating history from {}", url);

        let body = self.fetch_page(url).await?;
        debug!("Downloaded {} bytes", body.len());

        let rows = parse_table_rows(&body)?;
        info!("Found {} table rows", rows.len());
        Ok(rows)
    }
}

/// Read the rows of the first `<tbody>` in an HTML document.
///
/// Only direct `td`/`th` children of each direct `<tr>` are taken, so cell
/// positions match `nth-child` positions in the markup.
pub fn parse_table_rows(html: &str) -> Result<Vec<TableRow>, DataFormatError> {
    let document = Html::parse_document(html);
    let tbody = document
        .select(&TBODY)
        .next()
        .ok_or(DataFormatError::MissingTable)?;

    let rows = tbody
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "tr")
        .map(TableRow::from_element)
        .collect();

    Ok(rows)
}

/// Collapse whitespace runs the way a browser renders cell text.
fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let text: String = parts.collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GINNA_PAGE: &str = include_str!("../../fixtures/ginna_history.html");

    #[test]
    fn test_parse_fixture_rows() {
        let rows = parse_table_rows(GINNA_PAGE).unwrap();

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].cell(0), Some("1969"));
        assert_eq!(rows[1].cell(0), Some("1970"));
        assert_eq!(rows[1].cell(3), Some("6541"));
        assert_eq!(rows[6].cell(0), Some("1975"));
    }

    #[test]
    fn test_parse_uses_first_tbody_only() {
        let rows = parse_table_rows(GINNA_PAGE).unwrap();
        // The second table on the page lists unit details, not years.
        assert!(rows.iter().all(|row| row.cell(0) != Some("Reactor Type")));
    }

    #[test]
    fn test_parse_missing_table() {
        let html = "<html><body><p>Service unavailable</p></body></html>";
        assert_eq!(parse_table_rows(html), Err(DataFormatError::MissingTable));
    }

    #[test]
    fn test_parse_implicit_tbody() {
        // html5ever inserts a tbody when the markup omits it.
        let html = "<table><tr><td>2001</td><td>x</td><td>y</td><td>8000</td></tr></table>";
        let rows = parse_table_rows(html).unwrap();
        assert_eq!(rows, vec![TableRow::new(["2001", "x", "y", "8000"])]);
    }

    #[test]
    fn test_cell_text_is_normalized() {
        let html = "<table><tbody><tr><td>\n  2001 </td><td> <b>8</b>000 </td><td>a  b</td></tr></tbody></table>";
        let rows = parse_table_rows(html).unwrap();
        assert_eq!(rows[0].cell(0), Some("2001"));
        assert_eq!(rows[0].cell(1), Some("8000"));
        assert_eq!(rows[0].cell(2), Some("a b"));
    }

    #[test]
    fn test_nested_rows_are_not_flattened() {
        let html = "<table><tbody>\
            <tr><td>2001</td><td><table><tr><td>inner</td></tr></table></td></tr>\
            </tbody></table>";
        let rows = parse_table_rows(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 2);
    }
}
