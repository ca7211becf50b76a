//! Cell-text coercions and the fields derived from a measure's link.

use chrono::NaiveDate;
use url::Url;

use crate::error::ConversionError;

/// Leading character of the type labels that mark citizen-initiated measures
/// (CICA, CISS and friends).
pub const CITIZEN_KIND_PREFIX: char = 'C';

/// Parse a vote-count cell. Spaces, commas and periods are all thousands
/// separators here; periods are never decimal points.
pub fn parse_vote_count(text: &str) -> Result<u64, ConversionError> {
    let digits: String = text
        .chars()
        .filter(|&c| !matches!(c, ' ' | ',' | '.'))
        .collect();
    digits.parse().map_err(|_| ConversionError {
        field: "vote count",
        text: text.to_string(),
    })
}

/// Parse a currency cell, stripping the dollar sign and thousands separators.
/// An empty cell means no recorded amount and converts to zero.
pub fn parse_currency(text: &str) -> Result<f64, ConversionError> {
    let cleaned: String = text.chars().filter(|&c| !matches!(c, '$' | ',')).collect();
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    cleaned.parse().map_err(|_| ConversionError {
        field: "contribution amount",
        text: text.to_string(),
    })
}

/// Parse a readability-score cell. An empty cell scores zero.
pub fn parse_score(text: &str) -> Result<f64, ConversionError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse().map_err(|_| ConversionError {
        field: "readability score",
        text: text.to_string(),
    })
}

/// 1 when the type label marks a citizen-initiated measure, 0 otherwise.
pub fn cit_init(kind: &str) -> u8 {
    u8::from(kind.starts_with(CITIZEN_KIND_PREFIX))
}

/// Collapse a human-readable date to one number by concatenating its digits:
/// "November 8, 2022" becomes 82022. Not calendar-aware and loses the month;
/// [`date_iso`] carries the faithful form alongside.
pub fn clean_date(text: &str) -> Result<u64, ConversionError> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| ConversionError {
        field: "date",
        text: text.to_string(),
    })
}

/// Calendar-aware companion to [`clean_date`]: "November 8, 2022" becomes
/// "2022-11-08". `None` when the text is not a real date.
pub fn date_iso(text: &str) -> Option<String> {
    NaiveDate::parse_from_str(text.trim(), "%B %d, %Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Make a scraped href absolute. Hrefs already under the base pass through
/// untouched; everything else joins against the base URL.
pub fn absolutize(base: &Url, href: &str) -> Result<String, ConversionError> {
    if href.starts_with(base.as_str()) {
        return Ok(href.to_string());
    }
    base.join(href)
        .map(|url| url.to_string())
        .map_err(|_| ConversionError {
            field: "link",
            text: href.to_string(),
        })
}

/// State of a measure, read from its link: first path segment up to the first
/// underscore. "/Texas_Proposition_1_(2022)" gives "Texas"; two-word states
/// truncate ("North_Dakota_..." gives "North").
pub fn state_from_link(link: &str) -> String {
    let Ok(url) = Url::parse(link) else {
        return String::new();
    };
    url.path_segments()
        .and_then(|mut segments| segments.next())
        .map(|first| first.split('_').next().unwrap_or("").to_string())
        .unwrap_or_default()
}

/// Election date of a measure, read from the last parenthesized part of its
/// link with underscores restored to spaces: "..._(November_8,_2022)" gives
/// "November 8, 2022". Empty when the link carries no parenthesized date.
pub fn date_from_link(link: &str) -> String {
    let Some(open) = link.rfind('(') else {
        return String::new();
    };
    let rest = &link[open + 1..];
    let Some(close) = rest.find(')') else {
        return String::new();
    };
    rest[..close].replace('_', " ")
}
