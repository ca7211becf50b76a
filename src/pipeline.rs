//! Year-driven aggregation across the three extraction tasks.

use url::Url;

use crate::error::ScrapeError;
use crate::fetch::Fetch;
use crate::types::RawTables;
use crate::{finance, measures, readability};

/// Site root the yearly pages hang off.
pub const DEFAULT_BASE_URL: &str = "https://ballotpedia.org";
/// First election year scraped by default.
pub const DEFAULT_FROM_YEAR: u32 = 2018;
/// Last election year scraped by default (inclusive).
pub const DEFAULT_TO_YEAR: u32 = 2023;

/// Which pages to scrape: a base URL and an inclusive year range.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub from_year: u32,
    pub to_year: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            from_year: DEFAULT_FROM_YEAR,
            to_year: DEFAULT_TO_YEAR,
        }
    }
}

impl ScrapeConfig {
    fn base(&self) -> Result<Url, ScrapeError> {
        Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Config(format!("bad base URL '{}': {}", self.base_url, e)))
    }
}

/// Run all three extraction tasks over every configured year, appending each
/// year's rows to one running table per task. Rows keep first-seen order and
/// nothing is deduplicated; any failure aborts the run.
pub fn scrape_all(fetcher: &dyn Fetch, config: &ScrapeConfig) -> Result<RawTables, ScrapeError> {
    if config.from_year > config.to_year {
        return Err(ScrapeError::Config(format!(
            "year range {}..={} is empty",
            config.from_year, config.to_year
        )));
    }
    let base = config.base()?;

    let mut tables = RawTables::default();
    for year in config.from_year..=config.to_year {
        log::info!("scraping general info for {}", year);
        tables.measures.extend(measures::scrape_year(fetcher, &base, year)?);

        log::info!("scraping readability scores for {}", year);
        tables
            .readability
            .extend(readability::scrape_year(fetcher, &base, year)?);

        log::info!("scraping contributions for {}", year);
        tables
            .contributions
            .extend(finance::scrape_year(fetcher, &base, year)?);
    }
    log::info!(
        "scraped {} measures, {} readability rows, {} contribution rows",
        tables.measures.len(),
        tables.readability.len(),
        tables.contributions.len()
    );
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;

    #[test]
    fn empty_year_range_is_a_config_error() {
        let fetcher = MemoryFetcher::new();
        let config = ScrapeConfig {
            from_year: 2023,
            to_year: 2018,
            ..ScrapeConfig::default()
        };
        let err = scrape_all(&fetcher, &config).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let fetcher = MemoryFetcher::new();
        let config = ScrapeConfig {
            base_url: "not a url".to_string(),
            ..ScrapeConfig::default()
        };
        let err = scrape_all(&fetcher, &config).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn default_config_covers_the_known_year_span() {
        let config = ScrapeConfig::default();
        assert_eq!(config.from_year, 2018);
        assert_eq!(config.to_year, 2023);
        assert_eq!(config.base_url, "https://ballotpedia.org");
    }
}
