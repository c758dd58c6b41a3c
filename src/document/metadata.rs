//! Metadata extraction and record assembly
//!
//! Extraction is lenient and never fails: missing fields come back empty.
//! Validation happens in [`assemble`], which is where an unknown status
//! turns into an error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{parse_status, Adr, Status};
use crate::error::{AdrError, Result};

use super::dialect::Dialect;
use super::frontmatter::{body_after_frontmatter, frontmatter_date_value};

static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (\d+)\.[ \t]+(.+)$").unwrap());
static PLAIN_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());
static BODY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^date:[ \t]*(.+)$").unwrap());

/// Raw fields pulled out of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Number from a `# N. Title` heading, 0 when the heading has none
    pub number: u32,
    pub title: String,
    /// Status text as written, possibly several lines
    pub status: String,
    pub date: String,
}

/// Extracts number, title, status text, and date text from a document
pub fn extract_metadata(content: &str) -> Metadata {
    let mut meta = Metadata::default();

    if let Some(caps) = NUMBERED_HEADING.captures(content) {
        meta.number = caps[1].parse().unwrap_or(0);
        meta.title = caps[2].trim().to_string();
    } else if let Some(caps) = PLAIN_HEADING.captures(content) {
        meta.title = caps[1].trim().to_string();
    }

    if let Some(dialect) = Dialect::detect(content) {
        meta.status = dialect.status_text(content);
    }

    let body = body_after_frontmatter(content);
    meta.date = match BODY_DATE.captures(body) {
        Some(caps) => caps[1].trim().to_string(),
        None => frontmatter_date_value(content).unwrap_or_default(),
    };

    meta
}

/// Builds a record from extracted metadata
///
/// `fallback_number` (usually the filename prefix) is used when the heading
/// carries no number. Only the first non-blank line of the status text is
/// interpreted; later lines hold supersede references.
pub fn assemble(meta: Metadata, fallback_number: u32) -> Result<Adr> {
    let number = if meta.number == 0 { fallback_number } else { meta.number };

    let status = match first_non_blank_line(&meta.status) {
        None => Status::Proposed,
        Some(line) => parse_status(line).ok_or_else(|| AdrError::InvalidStatus(meta.status.clone()))?,
    };

    let date = NaiveDate::parse_from_str(meta.date.trim(), "%Y-%m-%d").ok();

    Ok(Adr {
        number,
        title: meta.title,
        status,
        date,
        content: None,
    })
}

/// Parses a whole document into a record with its content attached
pub fn parse_document(content: &str, fallback_number: u32) -> Result<Adr> {
    Ok(assemble(extract_metadata(content), fallback_number)?.with_content(content))
}

fn first_non_blank_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
