//! Campaign-finance extraction: support and opposition totals from a yearly
//! "Ballot_measure_campaign_finance" page.

use scraper::Html;
use url::Url;

use crate::clean;
use crate::error::{ParseError, ScrapeError};
use crate::fetch::Fetch;
use crate::section::{self, Section};
use crate::types::Contributions;

pub fn page_url(base: &Url, year: u32) -> String {
    format!("{}Ballot_measure_campaign_finance,_{}", base, year)
}

/// Scrape the per-measure contribution totals listed for one year. The
/// section holds one table per state, all of which are read.
pub fn scrape_year(
    fetcher: &dyn Fetch,
    base: &Url,
    year: u32,
) -> Result<Vec<Contributions>, ScrapeError> {
    let url = page_url(base, year);
    let body = fetcher.fetch(&url)?;
    let document = Html::parse_document(&body);

    let heading = format!("{} ballot measure contributions", year);
    let section = Section {
        start: &heading,
        ends: &[
            "See also",
            "Comparison to prior years",
            "Contributions per vote analysis",
        ],
        table_class: None,
        first_only: false,
    };

    let mut contributions = Vec::new();
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
            let href = section::first_href(cells[0]).ok_or_else(|| ParseError::MissingAnchor {
                page: url.clone(),
                row: row_ix + 1,
                cell: 0,
            })?;
            contributions.push(Contributions {
                support: clean::parse_currency(&section::cell_text(cells[1]))?,
                oppose: clean::parse_currency(&section::cell_text(cells[2]))?,
                link: clean::absolutize(base, href)?,
            });
        }
    }
    Ok(contributions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    fn base() -> Url {
        Url::parse("https://ballotpedia.org").unwrap()
    }

    const PAGE: &str = r#"
        <html><body>
          <h2>2022 ballot measure contributions</h2>
          <table>
            <tr><th>Measure</th><th>Support</th><th>Opposition</th></tr>
            <tr>
              <td><a href="/California_Proposition_26_(2022)">Proposition 26</a></td>
              <td>$1,234,567.89</td>
              <td>$250,000.00</td>
            </tr>
          </table>
          <table>
            <tr><th>Measure</th><th>Support</th><th>Opposition</th></tr>
            <tr>
              <td><a href="/Colorado_Proposition_121_(2022)">Proposition 121</a></td>
              <td></td>
              <td>$5,000.00</td>
            </tr>
          </table>
          <h2>See also</h2>
          <table>
            <tr><th>Measure</th><th>Support</th><th>Opposition</th></tr>
            <tr><td><a href="/Unrelated">x</a></td><td>$1</td><td>$2</td></tr>
          </table>
        </body></html>"#;

    #[test]
    fn reads_every_table_in_the_section() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), 2022), PAGE);

        let rows = scrape_year(&fetcher, &base(), 2022).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].support, 1234567.89);
        assert_eq!(rows[0].oppose, 250000.0);
        assert_eq!(rows[0].link, "https://ballotpedia.org/California_Proposition_26_(2022)");
    }

    #[test]
    fn empty_amounts_default_to_zero() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), 2022), PAGE);

        let rows = scrape_year(&fetcher, &base(), 2022).unwrap();
        assert_eq!(rows[1].support, 0.0);
        assert_eq!(rows[1].oppose, 5000.0);
    }

    #[test]
    fn tables_after_the_end_heading_are_ignored() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert(page_url(&base(), 2022), PAGE);

        let rows = scrape_year(&fetcher, &base(), 2022).unwrap();
        assert!(rows.iter().all(|r| !r.link.contains("Unrelated")));
    }
}
