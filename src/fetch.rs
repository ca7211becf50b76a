//! Page fetching. One blocking GET per URL, no caching, no retries.

use std::collections::HashMap;

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; BallotMeasureScraper/1.0)";

/// A source of page markup keyed by URL.
///
/// The pipeline only ever asks "give me the body for this URL", so the
/// boundary is a single method. Tests substitute [`MemoryFetcher`].
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Live HTTP fetcher over a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Http {
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
        response.text().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

/// Canned fetcher for tests and offline runs: URL to body. Unknown URLs
/// answer 404.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.insert(url.into(), body.into());
    }
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fetcher_serves_inserted_pages() {
        let mut fetcher = MemoryFetcher::new();
        fetcher.insert("https://example.org/page", "<html></html>");
        assert_eq!(fetcher.fetch("https://example.org/page").unwrap(), "<html></html>");
    }

    #[test]
    fn memory_fetcher_404s_unknown_urls() {
        let fetcher = MemoryFetcher::new();
        let err = fetcher.fetch("https://example.org/missing").unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }
}
