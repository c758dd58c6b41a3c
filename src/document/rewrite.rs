//! Status rewrites
//!
//! Every function here is a pure text transform. A superseded-by marker
//! overwrites whatever status was there; supersedes references accumulate
//! below (Nygard) or after (MADR) the current status.

use crate::domain::{parse_status, SupersedesLink};
use crate::error::{AdrError, Result};

use super::dialect::Dialect;
use super::section::append_to_status_section_content;

fn carrier(content: &str) -> Result<Dialect> {
    Dialect::detect(content).ok_or(AdrError::NoStatusSection)
}

/// Marks a document as superseded by `link`
pub fn set_superseded_by(content: &str, link: &SupersedesLink) -> Result<String> {
    let dialect = carrier(content)?;
    let text = match dialect {
        Dialect::Nygard => format!("Superseded by {link}"),
        Dialect::Madr => format!("superseded by {link}"),
    };
    Ok(dialect.replace_status(content, &text))
}

/// Adds supersedes references to a document, keeping its current status
///
/// An empty `links` slice leaves the document unchanged.
pub fn set_supersedes(content: &str, links: &[SupersedesLink]) -> Result<String> {
    let dialect = carrier(content)?;
    if links.is_empty() {
        return Ok(content.to_string());
    }

    match dialect {
        Dialect::Nygard => {
            let lines: Vec<String> = links.iter().map(|l| format!("Supersedes {l}")).collect();
            Ok(append_to_status_section_content(content, &lines.join("\n")))
        }
        Dialect::Madr => {
            let refs: Vec<String> = links.iter().map(ToString::to_string).collect();
            let value = format!("{}, supersedes {}", dialect.status_text(content), refs.join(", "));
            Ok(dialect.replace_status(content, &value))
        }
    }
}

/// Sets the status of a document
///
/// Only the leading status word is rewritten. Trailing lines such as
/// `Supersedes [ADR-0001](...)` and the MADR `, supersedes ...` suffix are
/// kept as-is.
pub fn update_status(content: &str, name: &str) -> Result<String> {
    let status = parse_status(name).ok_or_else(|| AdrError::InvalidStatus(name.to_string()))?;
    let dialect = carrier(content)?;
    let word = dialect.format_status(status);
    let current = dialect.status_text(content);

    let text = match dialect {
        Dialect::Nygard => match current.split_once('\n') {
            Some((_, rest)) => format!("{word}\n{rest}"),
            None => word.to_string(),
        },
        Dialect::Madr => match current.find(',') {
            Some(idx) => format!("{word}{}", &current[idx..]),
            None => word.to_string(),
        },
    };

    Ok(dialect.replace_status(content, &text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::extract_metadata;
    use crate::document::frontmatter::frontmatter_status_value;
    use crate::document::section::extract_status_section_content;

    const NYGARD: &str = "# 1. Use Go\n\nDate: 2024-01-01\n\n## Status\n\nAccepted\n\n## Context\n\nWe need a language.\n";
    const MADR: &str = "---\nstatus: \"accepted\"\ndate: 2024-01-01\n---\n\n# Use Go\n\n## Context and Problem Statement\n\nstatus: body text\n";

    #[test]
    fn superseded_by_overwrites_nygard() {
        let link = SupersedesLink::new(2, "0002-use-rust.md");
        let result = set_superseded_by(NYGARD, &link).unwrap();
        assert_eq!(
            extract_status_section_content(&result),
            "Superseded by [ADR-0002](0002-use-rust.md)"
        );
        assert!(result.ends_with("## Context\n\nWe need a language.\n"));
    }

    #[test]
    fn superseded_by_overwrites_madr() {
        let link = SupersedesLink::new(2, "0002-use-rust.md");
        let result = set_superseded_by(MADR, &link).unwrap();
        assert!(result.contains("status: \"superseded by [ADR-0002](0002-use-rust.md)\""));
        assert!(result.ends_with("status: body text\n"));
    }

    #[test]
    fn supersedes_appends_nygard() {
        let links = [
            SupersedesLink::new(1, "0001-a.md"),
            SupersedesLink::new(3, "0003-c.md"),
        ];
        let content = "# 4. D\n\n## Status\n\nProposed\n\n## Context\n\nC\n";
        let result = set_supersedes(content, &links).unwrap();
        assert_eq!(
            result,
            "# 4. D\n\n## Status\n\nProposed\n\nSupersedes [ADR-0001](0001-a.md)\nSupersedes [ADR-0003](0003-c.md)\n\n## Context\n\nC\n"
        );
    }

    #[test]
    fn supersedes_appends_madr() {
        let links = [
            SupersedesLink::new(1, "0001-a.md"),
            SupersedesLink::new(3, "0003-c.md"),
        ];
        let result = set_supersedes(MADR, &links).unwrap();
        assert_eq!(
            frontmatter_status_value(&result),
            "accepted, supersedes [ADR-0001](0001-a.md), [ADR-0003](0003-c.md)"
        );
        assert!(extract_metadata(&result).status.starts_with("accepted,"));
    }

    #[test]
    fn supersedes_empty_links_is_noop() {
        assert_eq!(set_supersedes(NYGARD, &[]).unwrap(), NYGARD);
    }

    #[test]
    fn no_carrier_is_error() {
        let content = "# 1. X\n\n## Context\n\nC\n";
        let link = SupersedesLink::new(2, "0002-y.md");
        assert!(matches!(set_superseded_by(content, &link), Err(AdrError::NoStatusSection)));
        assert!(matches!(set_supersedes(content, &[link]), Err(AdrError::NoStatusSection)));
        assert!(matches!(update_status(content, "accepted"), Err(AdrError::NoStatusSection)));
    }

    #[test]
    fn update_preserves_supersedes_lines() {
        let content = "# 1. T\n\n## Status\n\nProposed\n\nSupersedes [ADR-0001](x.md)\n\n## Context\n\nC\n";
        let result = update_status(content, "accepted").unwrap();
        assert!(result.contains("## Status\n\nAccepted\n\nSupersedes [ADR-0001](x.md)"));
        assert!(result.contains("## Context\n\nC"));
    }

    #[test]
    fn update_madr_scoped_to_frontmatter() {
        let content = "---\nstatus: \"accepted\"\n---\n\n# 1. X\n\nstatus: accepted in the body\n";
        let result = update_status(content, "rejected").unwrap();
        assert!(result.contains("status: \"rejected\""));
        assert!(result.contains("status: accepted in the body"));
    }

    #[test]
    fn update_madr_keeps_supersedes_suffix() {
        let content = "---\nstatus: \"proposed, supersedes [ADR-0001](0001-a.md)\"\n---\n\n# X\n";
        let result = update_status(content, "Accepted").unwrap();
        assert!(result.contains("status: \"accepted, supersedes [ADR-0001](0001-a.md)\""));
    }

    #[test]
    fn update_rejects_unknown_status_first() {
        let content = "# 1. X\n\n## Context\n";
        assert!(matches!(update_status(content, "bogus"), Err(AdrError::InvalidStatus(s)) if s == "bogus"));
    }

    #[test]
    fn update_is_idempotent() {
        let once = update_status(NYGARD, "deprecated").unwrap();
        let twice = update_status(&once, "deprecated").unwrap();
        assert_eq!(once, twice);
        assert_eq!(extract_status_section_content(&once), "Deprecated");
    }
}
