//! Scrape Ballotpedia's yearly ballot-measure tables, join them on the
//! measure link, derive the analysis columns and render exploratory charts.
//!
//! The pipeline is strictly sequential: for each configured year the three
//! extraction tasks run in turn, accumulating three flat tables. Those are
//! outer-joined on the link column, filtered down to real measures, extended
//! with the derived columns and handed to the chart and CSV writers.

pub mod charts;
pub mod clean;
pub mod error;
pub mod export;
pub mod fetch;
pub mod finance;
pub mod join;
pub mod logger;
pub mod measures;
pub mod pipeline;
pub mod readability;
pub mod section;
pub mod types;
pub mod utils;

pub use error::{ConversionError, FetchError, ParseError, ScrapeError};
pub use fetch::{Fetch, HttpFetcher, MemoryFetcher};
pub use measures::VOTE_LOOKUP_EXEMPT_YEAR;
pub use pipeline::{scrape_all, ScrapeConfig, DEFAULT_BASE_URL, DEFAULT_FROM_YEAR, DEFAULT_TO_YEAR};
pub use types::{AnalysisRecord, Contributions, JoinedRecord, Measure, RawTables, ReadabilityScore};
