//! Readability-score extraction: the score table of a yearly
//! "Ballot_measure_readability_scores" page.

use scraper::Html;
use url::Url;

use crate::clean;
use crate::error::{ParseError, ScrapeError};
use crate::fetch::Fetch;
use crate::section::{self, Section};
use crate::types::ReadabilityScore;

pub fn page_url(base: &Url, year: u32) -> String {
    format!("{}Ballot_measure_readability_scores,_{}", base, year)
}

/// Scrape the readability scores listed for one year. The page carries a
/// single score table right under its "<year> readability scores" heading.
pub fn scrape_year(
    fetcher: &dyn Fetch,
    base: &Url,
    year: u32,
) -> Result<Vec<ReadabilityScore>, ScrapeError> {
    let url = page_url(base, year);
    let body = fetcher.fetch(&url)?;
    let document = Html::parse_document(&body);

    let heading = format!("{} readability scores", year);
    let section = Section {
        start: &heading,
        ends: &[],
        table_class: None,
        first_only: true,
    };
    let tables = section::tables_in(&document, &section, &url)?;
    let table = tables.first().ok_or_else(|| ParseError::TableNotFound {
        page: url.clone(),
        heading: heading.clone(),
    })?;

    let mut scores = Vec::new();
    for (row_ix, row) in section::data_rows(*table).enumerate() {
        let cells = section::cells(row);
        if cells.len() < 3 {
            return Err(ParseError::RowShape {
                page: url.clone(),
                row: row_ix + 1,
                cells: cells.len(),
                expected: 3,
            }
            .into());
        }
        let href = section::first_href(cells[0]).ok_or_else(|| ParseError::MissingAnchor {
            page: url.clone(),
            row: row_ix + 1,
            cell: 0,
        })?;
        scores.push(ReadabilityScore {
            title_grade: clean::parse_score(&section::cell_text(cells[1]))?,
            title_ease: clean::parse_score(&section::cell_text(cells[2]))?,
            link: clean::absolutize(base, href)?,
        });
    }
    Ok(scores)
}
