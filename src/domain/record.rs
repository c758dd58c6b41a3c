//! ADR record model
//!
//! A record is built either fresh ([`Adr::new`]) or by parsing an existing
//! file. Records are never edited in place: rewriting a document and parsing
//! the result yields a new record.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Serialize, Serializer};

use super::status::Status;

/// An Architecture Decision Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adr {
    pub number: u32,
    pub title: String,
    pub status: Status,
    /// Decision date, `None` when missing or unparseable
    pub date: Option<NaiveDate>,
    /// Raw document text, attached when a single record is loaded
    pub content: Option<String>,
}

impl Adr {
    /// Creates a new proposed ADR dated today
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            status: Status::Proposed,
            date: Some(Local::now().date_naive()),
            content: None,
        }
    }

    /// Returns the date as `YYYY-MM-DD`, or an empty string when unset
    pub fn date_string(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Attaches raw document text
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A cross-reference to another ADR, rendered as `[ADR-NNNN](filename)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupersedesLink {
    pub number: u32,
    pub filename: String,
}

impl SupersedesLink {
    pub fn new(number: u32, filename: impl Into<String>) -> Self {
        Self {
            number,
            filename: filename.into(),
        }
    }
}

impl std::fmt::Display for SupersedesLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ADR-{:04}]({})", self.number, self.filename)
    }
}

/// Filters records by a search query
///
/// Titles match case-insensitively on substring. An all-digit query also
/// matches the record with exactly that number. Each record appears at most
/// once; an empty or blank query returns the input unchanged.
pub fn filter_by_query(records: Vec<Adr>, query: &str) -> Vec<Adr> {
    let query = query.trim();
    if query.is_empty() {
        return records;
    }

    let lower = query.to_lowercase();
    let number: Option<u32> = if query.chars().all(|c| c.is_ascii_digit()) {
        query.parse().ok()
    } else {
        None
    };

    records
        .into_iter()
        .filter(|r| r.title.to_lowercase().contains(&lower) || number == Some(r.number))
        .collect()
}

/// ADR counts grouped by status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "byStatus", serialize_with = "serialize_by_status")]
    pub by_status: BTreeMap<Status, usize>,
    pub total: usize,
}

impl StatusCounts {
    /// Returns the count for a status
    pub fn get(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

fn serialize_by_status<S: Serializer>(
    map: &BTreeMap<Status, usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(status, count)| (status.as_str(), count)))
}

/// Tallies records by status; every status is present, even at zero
pub fn count_by_status(records: &[Adr]) -> StatusCounts {
    let mut by_status: BTreeMap<Status, usize> = Status::all().iter().map(|s| (*s, 0)).collect();
    for record in records {
        *by_status.entry(record.status).or_insert(0) += 1;
    }

    StatusCounts {
        by_status,
        total: records.len(),
    }
}

/// Summary shape used by `list` output and `GET /api/adr`
#[derive(Debug, Clone, Serialize)]
pub struct AdrSummary {
    pub number: u32,
    pub title: String,
    pub status: Status,
    pub date: String,
}

impl From<&Adr> for AdrSummary {
    fn from(adr: &Adr) -> Self {
        Self {
            number: adr.number,
            title: adr.title.clone(),
            status: adr.status,
            date: adr.date_string(),
        }
    }
}

/// Full shape including the raw document, used by `GET /api/adr/{number}`
#[derive(Debug, Clone, Serialize)]
pub struct AdrDetail {
    #[serde(flatten)]
    pub summary: AdrSummary,
    pub content: String,
}

impl From<&Adr> for AdrDetail {
    fn from(adr: &Adr) -> Self {
        Self {
            summary: AdrSummary::from(adr),
            content: adr.content.clone().unwrap_or_default(),
        }
    }
}
