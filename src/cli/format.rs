//! Terminal rendering of ADR documents
//!
//! Line-oriented: each line is styled on its own from a handful of prefixes.
//! With colour off the text is returned with bullets and links rewritten but
//! no escape codes.

use std::sync::LazyLock;

use crossterm::style::Stylize;
use regex::{Captures, Regex};

use crate::domain::{parse_status, StatusCategory};

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

#[derive(Debug, Clone, Copy)]
enum Style {
    Title,
    Heading,
    Dim,
    Active,
    Pending,
    Inactive,
    LinkLabel,
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if !color {
        return text.to_string();
    }

    let styled = match style {
        Style::Title => text.cyan().bold(),
        Style::Heading => text.bold(),
        Style::Dim => text.dim(),
        Style::Active => text.green(),
        Style::Pending => text.yellow(),
        Style::Inactive => text.red(),
        Style::LinkLabel => text.blue().underlined(),
    };
    styled.to_string()
}

/// Colours text that starts with a status by the status category
///
/// Green for active, yellow for pending, red for inactive; anything else is
/// returned as-is.
pub fn status_color(text: &str, color: bool) -> String {
    let style = match parse_status(text).map(|s| s.category()) {
        Some(StatusCategory::Active) => Style::Active,
        Some(StatusCategory::Pending) => Style::Pending,
        Some(StatusCategory::Inactive) => Style::Inactive,
        None => return text.to_string(),
    };
    paint(text, style, color)
}

fn format_links(line: &str, color: bool) -> String {
    LINK.replace_all(line, |caps: &Captures| {
        format!(
            "{}{}",
            paint(&caps[1], Style::LinkLabel, color),
            paint(&format!("({})", &caps[2]), Style::Dim, color)
        )
    })
    .into_owned()
}

/// Rewrites a `- ` or `* ` list item; other lines only get their links styled
fn format_bullet(line: &str, color: bool) -> String {
    let rest = line.trim_start_matches(char::is_whitespace);
    let indent = &line[..line.len() - rest.len()];
    match rest.strip_prefix("- ").or_else(|| rest.strip_prefix("* ")) {
        Some(item) => format!("{indent}• {}", format_links(item, color)),
        None => format_links(line, color),
    }
}

/// Renders ADR markdown for the terminal
pub fn format_adr(content: &str, color: bool) -> String {
    let mut out = Vec::new();
    let mut delimiters = 0;
    let mut in_frontmatter = false;
    let mut in_status = false;

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed == "---" {
            delimiters += 1;
            if delimiters <= 2 {
                in_frontmatter = delimiters == 1;
            }
            out.push(paint(line, Style::Dim, color));
            continue;
        }

        if in_frontmatter {
            out.push(paint(line, Style::Dim, color));
            continue;
        }

        let formatted = if trimmed.starts_with("# ") {
            in_status = false;
            paint(line, Style::Title, color)
        } else if let Some(heading) = trimmed.strip_prefix("## ") {
            in_status = heading.eq_ignore_ascii_case("status");
            paint(line, Style::Heading, color)
        } else if trimmed.starts_with("### ") {
            paint(line, Style::Heading, color)
        } else if trimmed.starts_with("Date:") || trimmed.starts_with("date:") {
            paint(line, Style::Dim, color)
        } else if in_status && !trimmed.is_empty() {
            status_color(trimmed, color)
        } else if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            format_bullet(line, color)
        } else {
            format_links(line, color)
        };
        out.push(formatted);
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# 1. Use Go\n\nDate: 2024-01-01\n\n## Status\n\nAccepted\n\n## Context\n\n- first\n  * nested [ADR-0002](0002-x.md)\n";

    #[test]
    fn plain_rewrites_bullets_and_links() {
        let out = format_adr(DOC, false);
        assert_eq!(
            out,
            "# 1. Use Go\n\nDate: 2024-01-01\n\n## Status\n\nAccepted\n\n## Context\n\n• first\n  • nested ADR-0002(0002-x.md)\n"
        );
    }

    #[test]
    fn plain_has_no_escape_codes() {
        let madr = "---\nstatus: accepted\n---\n\n# X\n";
        assert!(!format_adr(madr, false).contains('\x1b'));
    }

    #[test]
    fn color_styles_headings_and_status() {
        let out = format_adr(DOC, true);
        assert!(out.contains('\x1b'));
        assert!(out.contains("Use Go"));

        let status_line = out.lines().nth(6).unwrap();
        assert_ne!(status_line, "Accepted");
        assert!(status_line.contains("Accepted"));
    }

    #[test]
    fn status_color_ignores_unknown_text() {
        assert_eq!(status_color("Whatever", true), "Whatever");
        assert_eq!(status_color("Accepted", false), "Accepted");
        assert_ne!(status_color("Accepted", true), "Accepted");
    }

    #[test]
    fn bullets_after_unicode_indent() {
        let out = format_adr("# 1. X\n\n## Context\n\n\u{3000}- item\n\u{a0}* other\n", false);
        assert!(out.contains("\n\u{3000}• item\n"));
        assert!(out.contains("\n\u{a0}• other\n"));
    }

    #[test]
    fn marker_without_space_is_not_a_bullet() {
        assert_eq!(format_bullet("\u{3000}-x", false), "\u{3000}-x");
    }

    #[test]
    fn lines_after_status_section_are_not_status() {
        let out = format_adr("## Status\n\nProposed\n\n## Context\n\nAccepted practice\n", true);
        assert!(out.ends_with("\nAccepted practice\n"));
    }
}
