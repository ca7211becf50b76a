//! General-info extraction: the "By state" tables of a yearly ballot-measure
//! page, plus the per-measure vote drill-down for summary rows that carry no
//! totals of their own.

use scraper::Html;
use url::Url;

use crate::clean;
use crate::error::{ParseError, ScrapeError};
use crate::fetch::Fetch;
use crate::section::{self, Section};
use crate::types::Measure;

/// Year whose summary rows are allowed to miss vote counts without a
/// drill-down; its measure pages carry no results yet.
pub const VOTE_LOOKUP_EXEMPT_YEAR: u32 = 2024;

/// Cell counts whose description sits at index 3; every other shape keeps it
/// at index 2. The yearly tables are not consistent about their columns.
const DESCRIPTION_AT_3: &[usize] = &[4, 5, 7];

/// Minimum cell count for a summary row to carry its own vote totals in the
/// last two cells.
const VOTES_INLINE_MIN_CELLS: usize = 6;

pub fn page_url(base: &Url, year: u32) -> String {
    format!("{}{}_ballot_measures", base, year)
}

/// Scrape every statewide measure listed for one year.
pub fn scrape_year(
    fetcher: &dyn Fetch,
    base: &Url,
    year: u32,
) -> Result<Vec<Measure>, ScrapeError> {
    let url = page_url(base, year);
    let body = fetcher.fetch(&url)?;
    let document = Html::parse_document(&body);

    let section = Section {
        start: "By state",
        ends: &["Local ballot measures", "D.C. ballot measures"],
        table_class: Some("bptable"),
        first_only: false,
    };

    let mut measures = Vec::new();
    for table in section::tables_in(&document, &section, &url)? {
        for (row_ix, row) in section::data_rows(table).enumerate() {
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

            let kind = section::cell_text(cells[0]);
            let title = section::cell_text(cells[1]);
            let href = section::first_href(cells[1]).ok_or_else(|| ParseError::MissingAnchor {
                page: url.clone(),
                row: row_ix + 1,
                cell: 1,
            })?;
            let link = clean::absolutize(base, href)?;

            let description_ix = if DESCRIPTION_AT_3.contains(&cells.len()) { 3 } else { 2 };
            let description = section::cell_text(cells[description_ix]);

            let (votes_yes, votes_no) = if cells.len() >= VOTES_INLINE_MIN_CELLS {
                let yes = clean::parse_vote_count(&section::cell_text(cells[cells.len() - 2]))?;
                let no = clean::parse_vote_count(&section::cell_text(cells[cells.len() - 1]))?;
                (Some(yes), Some(no))
            } else if year == VOTE_LOOKUP_EXEMPT_YEAR {
                (None, None)
            } else {
                let (yes, no) = lookup_votes(fetcher, &link)?;
                (Some(yes), Some(no))
            };

            let state = clean::state_from_link(&link);
            let date = clean::date_from_link(&link);
            log::debug!("parsed {} ({}, {})", title, state, year);

            measures.push(Measure {
                kind,
                title,
                link,
                state,
                description,
                date,
                votes_yes,
                votes_no,
                year,
            });
        }
    }
    Ok(measures)
}

/// Fetch a measure's own page and read both vote totals from its "Election
/// results" table: yes votes from the second-to-last row, no votes from the
/// last, count in cell 1 of each.
pub fn lookup_votes(fetcher: &dyn Fetch, link: &str) -> Result<(u64, u64), ScrapeError> {
    let body = fetcher.fetch(link)?;
    let document = Html::parse_document(&body);

    let section = Section {
        start: "Election results",
        ends: &[],
        table_class: None,
        first_only: true,
    };
    let tables = section::tables_in(&document, &section, link)?;
    let table = tables.first().ok_or_else(|| ParseError::TableNotFound {
        page: link.to_string(),
        heading: "Election results".to_string(),
    })?;

    let rows: Vec<_> = section::rows(*table).collect();
    if rows.len() < 2 {
        return Err(ParseError::TooFewRows {
            page: link.to_string(),
            rows: rows.len(),
            expected: 2,
        }
        .into());
    }
    let yes = vote_cell(rows[rows.len() - 2], rows.len() - 2, link)?;
    let no = vote_cell(rows[rows.len() - 1], rows.len() - 1, link)?;
    Ok((yes, no))
}

fn vote_cell(
    row: scraper::ElementRef<'_>,
    row_ix: usize,
    page: &str,
) -> Result<u64, ScrapeError> {
    let cells = section::cells(row);
    if cells.len() < 2 {
        return Err(ParseError::RowShape {
            page: page.to_string(),
            row: row_ix,
            cells: cells.len(),
            expected: 2,
        }
        .into());
    }
    Ok(clean::parse_vote_count(&section::cell_text(cells[1]))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    fn base() -> Url {
        Url::parse("https://ballotpedia.org").unwrap()
    }

    const GENERAL_2020: &str = r#"
        <html><body>
          <h2>Overview</h2>
          <table class="bptable"><tr><th>x</th></tr><tr><td>skip</td><td>me</td><td>please</td></tr></table>
          <h2>By state</h2>
          <table class="bptable">
            <tr><th>Type</th><th>Title</th><th>Subject</th><th>Description</th><th>Status</th><th>Yes</th><th>No</th></tr>
            <tr>
              <td>CICA</td>
              <td><a href="/Colorado_Proposition_1_(November_3,_2020)">Colorado Proposition 1</a></td>
              <td>Taxes</td>
              <td>Lower the state income tax</td>
              <td>Approved</td>
              <td>1,234,567</td>
              <td>765,432</td>
            </tr>
          </table>
          <table class="bptable">
            <tr><th>Type</th><th>Title</th><th>Status</th><th>Description</th></tr>
            <tr>
              <td>LRCA</td>
              <td><a href="/Utah_Amendment_A_(November_3,_2020)">Utah Amendment A</a></td>
              <td>Approved</td>
              <td>Remove the slavery exception</td>
            </tr>
          </table>
          <h2>Local ballot measures</h2>
          <table class="bptable"><tr><th>x</th></tr><tr><td>local</td><td>rows</td><td>ignored</td></tr></table>
        </body></html>"#;

    const UTAH_PAGE: &str = r#"
        <html><body>
          <h2>Background</h2>
          <table><tr><td>not the results</td></tr></table>
          <h2>Election results</h2>
          <table>
            <tr><th>Utah Amendment A</th></tr>
            <tr><td>Result</td><td>Votes</td><td>Percentage</td></tr>
            <tr><td>Yes</td><td>1,113,405</td><td>80.70%</td></tr>
            <tr><td>No</td><td>266,301</td><td>19.30%</td></tr>
          </table>
        </body></html>"#;

    #[test]
    fn reads_summary_rows_and_drills_down_for_missing_votes() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), 2020), GENERAL_2020);
        fetcher.insert(
            "https://ballotpedia.org/Utah_Amendment_A_(November_3,_2020)",
            UTAH_PAGE,
        );

        let measures = scrape_year(&fetcher, &base(), 2020).unwrap();
        assert_eq!(measures.len(), 2);

        let colorado = &measures[0];
        assert_eq!(colorado.kind, "CICA");
        assert_eq!(colorado.title, "Colorado Proposition 1");
        assert_eq!(
            colorado.link,
            "https://ballotpedia.org/Colorado_Proposition_1_(November_3,_2020)"
        );
        assert_eq!(colorado.state, "Colorado");
        assert_eq!(colorado.date, "November 3, 2020");
        assert_eq!(colorado.description, "Lower the state income tax");
        assert_eq!(colorado.votes_yes, Some(1234567));
        assert_eq!(colorado.votes_no, Some(765432));
        assert_eq!(colorado.year, 2020);

        let utah = &measures[1];
        assert_eq!(utah.kind, "LRCA");
        assert_eq!(utah.state, "Utah");
        assert_eq!(utah.description, "Remove the slavery exception");
        assert_eq!(utah.votes_yes, Some(1113405));
        assert_eq!(utah.votes_no, Some(266301));
    }

    #[test]
    fn exempt_year_skips_the_drill_down() {
        let page = GENERAL_2020;
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), VOTE_LOOKUP_EXEMPT_YEAR), page);
        // No measure page inserted: a drill-down attempt would 404.

        let measures = scrape_year(&fetcher, &base(), VOTE_LOOKUP_EXEMPT_YEAR).unwrap();
        assert_eq!(measures[1].votes_yes, None);
        assert_eq!(measures[1].votes_no, None);
        // Rows with inline totals still get them.
        assert_eq!(measures[0].votes_yes, Some(1234567));
    }

    #[test]
    fn title_without_a_link_is_an_error() {
        let page = r#"
            <html><body><h2>By state</h2>
            <table class="bptable">
              <tr><th>a</th><th>b</th><th>c</th></tr>
              <tr><td>CICA</td><td>No Anchor Here</td><td>desc</td></tr>
            </table></body></html>"#;
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), 2022), page);

        let err = scrape_year(&fetcher, &base(), 2022).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Parse(ParseError::MissingAnchor { cell: 1, .. })
        ));
    }

    #[test]
    fn drill_down_reads_the_last_two_result_rows() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("https://ballotpedia.org/Utah_Amendment_A_(November_3,_2020)", UTAH_PAGE);

        let (yes, no) = lookup_votes(
            &fetcher,
            "https://ballotpedia.org/Utah_Amendment_A_(November_3,_2020)",
        )
        .unwrap();
        assert_eq!(yes, 1113405);
        assert_eq!(no, 266301);
    }

    #[test]
    fn drill_down_without_results_heading_is_an_error() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("https://ballotpedia.org/X", "<html><body><h2>Other</h2></body></html>");

        let err = lookup_votes(&fetcher, "https://ballotpedia.org/X").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::Parse(ParseError::HeadingNotFound { .. })
        ));
    }
}
