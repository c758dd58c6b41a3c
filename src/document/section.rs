//! The `## Status` section of Nygard-style documents
//!
//! The section body runs from the end of the `## Status` heading line up to
//! the next `\n\n## ` boundary, or to the end of the document. The boundary
//! itself (blank line plus the following heading) is never touched.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static STATUS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## Status[ \t]*$").unwrap());

const NEXT_HEADING: &str = "\n\n## ";

/// Checks for a `## Status` heading line
pub fn has_status_section(content: &str) -> bool {
    STATUS_HEADING.is_match(content)
}

/// Returns the byte range of the section body, heading excluded
fn section_span(content: &str) -> Option<Range<usize>> {
    let heading = STATUS_HEADING.find(content)?;
    let start = heading.end();
    let end = content[start..]
        .find(NEXT_HEADING)
        .map_or(content.len(), |idx| start + idx);
    Some(start..end)
}

/// Returns the trimmed section body, or an empty string
pub fn extract_status_section_content(content: &str) -> String {
    section_span(content)
        .map(|span| content[span].trim().to_string())
        .unwrap_or_default()
}

/// Replaces the section body with `new_content`
///
/// The body is written as a blank line followed by `new_content`. When the
/// section is the last one, a trailing newline is kept. Documents without
/// a `## Status` heading are returned unchanged.
pub fn replace_status_section_content(content: &str, new_content: &str) -> String {
    let Some(span) = section_span(content) else {
        return content.to_string();
    };

    let mut out = String::with_capacity(content.len() + new_content.len() + 3);
    out.push_str(&content[..span.start]);
    out.push_str("\n\n");
    out.push_str(new_content);
    if span.end == content.len() {
        out.push('\n');
    } else {
        out.push_str(&content[span.end..]);
    }
    out
}

/// Appends `extra` below the existing section body, separated by a blank line
pub fn append_to_status_section_content(content: &str, extra: &str) -> String {
    let existing = extract_status_section_content(content);
    if existing.is_empty() {
        return replace_status_section_content(content, extra);
    }
    replace_status_section_content(content, &format!("{existing}\n\n{extra}"))
}
