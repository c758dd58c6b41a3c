//! Template rendering for new records

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::domain::Adr;

use super::dialect::Dialect;

static TOP_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# .*$").unwrap());
static DATE_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Date:.*$").unwrap());
static DATE_LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^date:.*$").unwrap());

/// Fills a template with a record's heading, date, and status
///
/// Only the first `# ` heading is replaced. Every `Date:` / `date:` line is
/// rewritten. Templates without a status carrier keep their status text.
pub fn render_template(template: &str, record: &Adr) -> String {
    let heading = format!("# {}. {}", record.number, record.title);
    let date = record.date_string();

    let out = TOP_HEADING.replace(template, NoExpand(&heading));
    let out = DATE_UPPER.replace_all(&out, NoExpand(&format!("Date: {date}")));
    let out = DATE_LOWER
        .replace_all(&out, NoExpand(&format!("date: {date}")))
        .into_owned();

    match Dialect::detect(&out) {
        Some(dialect) => dialect.replace_status(&out, dialect.format_status(record.status)),
        None => out,
    }
}
