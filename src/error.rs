//! Error taxonomy for a scrape run.
//!
//! Any of these aborts the run; errors carry the page and position they came
//! from so a failed run names the exact cell that broke.

use thiserror::Error;

/// Network-level failure while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Expected page structure that was not found.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no heading containing '{heading}' on {page}")]
    HeadingNotFound { page: String, heading: String },
    #[error("no table under heading '{heading}' on {page}")]
    TableNotFound { page: String, heading: String },
    #[error("{page}: results table has {rows} rows, expected at least {expected}")]
    TooFewRows {
        page: String,
        rows: usize,
        expected: usize,
    },
    #[error("{page}: row {row} has {cells} cells, expected at least {expected}")]
    RowShape {
        page: String,
        row: usize,
        cells: usize,
        expected: usize,
    },
    #[error("{page}: row {row} cell {cell} has no link")]
    MissingAnchor {
        page: String,
        row: usize,
        cell: usize,
    },
}

/// Cell text that could not be coerced into the expected type.
#[derive(Debug, Error)]
#[error("cannot read {field} from '{text}'")]
pub struct ConversionError {
    pub field: &'static str,
    pub text: String,
}

/// Umbrella error for the whole pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Convert(#[from] ConversionError),
    #[error("configuration error: {0}")]
    Config(String),
}
