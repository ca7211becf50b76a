//! Record types for the three scraped tables and the joined analysis table.
//!
//! Serde renames keep the CSV headers identical to the column names the
//! analysis has always used, `Total Votes` space and all.

use serde::Serialize;

/// One measure row from a yearly "ballot measures" page.
#[derive(Debug, Clone, Serialize)]
pub struct Measure {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Date")]
    pub date: String,
    /// Missing only for the year that carries no results to look up.
    #[serde(rename = "Votes_Yes")]
    pub votes_yes: Option<u64>,
    #[serde(rename = "Votes_No")]
    pub votes_no: Option<u64>,
    #[serde(rename = "Year")]
    pub year: u32,
}

/// One row from a yearly readability-scores page.
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityScore {
    #[serde(rename = "Title_Grade")]
    pub title_grade: f64,
    #[serde(rename = "Title_Ease")]
    pub title_ease: f64,
    #[serde(rename = "Link")]
    pub link: String,
}

/// One row from a yearly campaign-finance page.
#[derive(Debug, Clone, Serialize)]
pub struct Contributions {
    #[serde(rename = "Support")]
    pub support: f64,
    #[serde(rename = "Oppose")]
    pub oppose: f64,
    #[serde(rename = "Link")]
    pub link: String,
}

/// The three raw tables accumulated across every configured year.
#[derive(Debug, Default)]
pub struct RawTables {
    pub measures: Vec<Measure>,
    pub readability: Vec<ReadabilityScore>,
    pub contributions: Vec<Contributions>,
}

/// Intermediate outer-join row. Everything except the link is optional: a
/// link seen only in the readability or contributions table has no
/// general-info fields, and the other way round.
#[derive(Debug, Clone, Default)]
pub struct JoinedRecord {
    pub link: String,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub year: Option<u32>,
    pub votes_yes: Option<u64>,
    pub votes_no: Option<u64>,
    pub title_grade: Option<f64>,
    pub title_ease: Option<f64>,
    pub support: Option<f64>,
    pub oppose: Option<f64>,
}

/// Final analysis row: joined, filtered, derived columns filled in.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Digit-concatenated form of the election date, e.g. 82022.
    #[serde(rename = "Date")]
    pub date: u64,
    #[serde(rename = "Votes_Yes")]
    pub votes_yes: Option<u64>,
    #[serde(rename = "Votes_No")]
    pub votes_no: Option<u64>,
    #[serde(rename = "Title_Grade")]
    pub title_grade: Option<f64>,
    #[serde(rename = "Title_Ease")]
    pub title_ease: Option<f64>,
    #[serde(rename = "Support")]
    pub support: Option<f64>,
    #[serde(rename = "Oppose")]
    pub oppose: Option<f64>,
    /// Yes votes minus no votes; negative when the measure failed.
    #[serde(rename = "Closeness")]
    pub closeness: Option<i64>,
    #[serde(rename = "cit_init")]
    pub cit_init: u8,
    #[serde(rename = "Total Votes")]
    pub total_votes: Option<u64>,
    #[serde(rename = "Year")]
    pub year: u32,
    /// ISO form of the election date, kept alongside the numeric one.
    #[serde(rename = "Date_ISO")]
    pub date_iso: Option<String>,
}
