//! Outer join of the three tables on Link, plus the derived analysis columns.

use std::collections::{HashMap, HashSet};

use crate::clean;
use crate::error::ScrapeError;
use crate::types::{AnalysisRecord, JoinedRecord, RawTables};

/// Date value marking a known artifact row rather than a real measure.
const DATE_SENTINEL: &str = "TIF";

/// Outer-join readability scores with contributions on link, then general
/// info onto that. Row order follows the general-info table; links that never
/// appeared there trail at the end with their general fields empty.
pub fn outer_join(raw: &RawTables) -> Vec<JoinedRecord> {
    // readability with contributions first
    let mut contr_ix: HashMap<&str, usize> = HashMap::new();
    for (i, c) in raw.contributions.iter().enumerate() {
        contr_ix.entry(c.link.as_str()).or_insert(i);
    }
    let read_links: HashSet<&str> = raw.readability.iter().map(|r| r.link.as_str()).collect();

    let mut scores = Vec::with_capacity(raw.readability.len() + raw.contributions.len());
    for r in &raw.readability {
        let contr = contr_ix.get(r.link.as_str()).map(|&i| &raw.contributions[i]);
        scores.push(JoinedRecord {
            link: r.link.clone(),
            title_grade: Some(r.title_grade),
            title_ease: Some(r.title_ease),
            support: contr.map(|c| c.support),
            oppose: contr.map(|c| c.oppose),
            ..JoinedRecord::default()
        });
    }
    for c in &raw.contributions {
        if !read_links.contains(c.link.as_str()) {
            scores.push(JoinedRecord {
                link: c.link.clone(),
                support: Some(c.support),
                oppose: Some(c.oppose),
                ..JoinedRecord::default()
            });
        }
    }

    // then general info onto the combined score rows
    let general_links: HashSet<&str> = raw.measures.iter().map(|m| m.link.as_str()).collect();
    let mut joined = Vec::with_capacity(raw.measures.len() + scores.len());
    {
        let mut score_ix: HashMap<&str, usize> = HashMap::new();
        for (i, row) in scores.iter().enumerate() {
            score_ix.entry(row.link.as_str()).or_insert(i);
        }
        for m in &raw.measures {
            let score = score_ix.get(m.link.as_str()).map(|&i| &scores[i]);
            joined.push(JoinedRecord {
                link: m.link.clone(),
                kind: Some(m.kind.clone()),
                title: Some(m.title.clone()),
                state: Some(m.state.clone()),
                description: Some(m.description.clone()),
                date: Some(m.date.clone()),
                year: Some(m.year),
                votes_yes: m.votes_yes,
                votes_no: m.votes_no,
                title_grade: score.and_then(|s| s.title_grade),
                title_ease: score.and_then(|s| s.title_ease),
                support: score.and_then(|s| s.support),
                oppose: score.and_then(|s| s.oppose),
            });
        }
    }
    for row in scores {
        if !general_links.contains(row.link.as_str()) {
            joined.push(row);
        }
    }
    joined
}

/// Filter the joined rows and fill in the derived columns: drop rows without
/// a general-info side, drop the "TIF" artifact, then compute closeness,
/// total votes, the citizen-initiated flag and both date forms.
pub fn finalize(joined: Vec<JoinedRecord>) -> Result<Vec<AnalysisRecord>, ScrapeError> {
    let mut records = Vec::with_capacity(joined.len());
    for row in joined {
        let Some(kind) = row.kind else {
            continue;
        };
        let date = row.date.unwrap_or_default();
        if date == DATE_SENTINEL {
            continue;
        }

        let cit_init = clean::cit_init(&kind);
        let closeness = row
            .votes_yes
            .zip(row.votes_no)
            .map(|(yes, no)| yes as i64 - no as i64);
        let total_votes = row.votes_yes.zip(row.votes_no).map(|(yes, no)| yes + no);

        records.push(AnalysisRecord {
            kind,
            title: row.title.unwrap_or_default(),
            link: row.link,
            state: row.state.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            date_iso: clean::date_iso(&date),
            date: clean::clean_date(&date)?,
            votes_yes: row.votes_yes,
            votes_no: row.votes_no,
            title_grade: row.title_grade,
            title_ease: row.title_ease,
            support: row.support,
            oppose: row.oppose,
            closeness,
            cit_init,
            total_votes,
            year: row.year.unwrap_or_default(),
        });
    }
    Ok(records)
}

/// The two steps together: join, then filter and derive.
pub fn analyze(raw: &RawTables) -> Result<Vec<AnalysisRecord>, ScrapeError> {
    finalize(outer_join(raw))
}
