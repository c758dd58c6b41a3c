//! Title slugs and ADR filenames
//!
//! Filename format: `{number:04}-{slug}.md` (e.g. `0001-use-go-for-cli.md`).
//! Numbers wider than four digits are written as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AdrError, Result};

static ADR_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4,})-.*\.md$").unwrap());

/// Converts a title into a lowercase, hyphen-separated slug
///
/// Spaces become hyphens, anything outside `[a-z0-9-]` is dropped, runs of
/// hyphens collapse, and leading/trailing hyphens are trimmed. A title with
/// nothing left is an error.
pub fn slugify(title: &str) -> Result<String> {
    let mut slug = String::with_capacity(title.len());

    for c in title.trim().to_lowercase().chars() {
        let c = if c == ' ' { '-' } else { c };
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(AdrError::EmptySlug(title.to_string()));
    }
    Ok(slug.to_string())
}

/// Returns the filename for an ADR number and title
pub fn format_filename(number: u32, title: &str) -> Result<String> {
    Ok(format!("{:04}-{}.md", number, slugify(title)?))
}

/// Returns the numeric prefix of an ADR filename, or `None` for any other file
///
/// `template.md`, `README.md` and friends have no numeric prefix and are
/// never treated as records.
pub fn parse_filename(name: &str) -> Option<u32> {
    ADR_FILE
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Use Go for CLI").unwrap(), "use-go-for-cli");
        assert_eq!(slugify("  Padded Title  ").unwrap(), "padded-title");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Use C++ & Rust!").unwrap(), "use-c-rust");
        assert_eq!(slugify("Why? Because.").unwrap(), "why-because");
        assert_eq!(slugify("--Leading and trailing--").unwrap(), "leading-and-trailing");
    }

    #[test]
    fn slugify_collapses_hyphens() {
        assert_eq!(slugify("a  -  b").unwrap(), "a-b");
    }

    #[test]
    fn slugify_empty_is_error() {
        assert!(matches!(slugify(""), Err(AdrError::EmptySlug(_))));
        assert!(matches!(slugify("!!!"), Err(AdrError::EmptySlug(_))));
        assert!(matches!(slugify("日本語"), Err(AdrError::EmptySlug(_))));
    }

    #[test]
    fn format_filename_pads_to_four_digits() {
        assert_eq!(format_filename(1, "Use Go for CLI").unwrap(), "0001-use-go-for-cli.md");
        assert_eq!(format_filename(42, "Test").unwrap(), "0042-test.md");
        assert_eq!(format_filename(1234, "Test").unwrap(), "1234-test.md");
        assert_eq!(format_filename(12345, "Test").unwrap(), "12345-test.md");
    }

    #[test]
    fn parse_filename_accepts_numbered_markdown() {
        assert_eq!(parse_filename("0001-use-go.md"), Some(1));
        assert_eq!(parse_filename("0042-x.md"), Some(42));
        assert_eq!(parse_filename("12345-big.md"), Some(12345));
    }

    #[test]
    fn parse_filename_ignores_other_files() {
        assert_eq!(parse_filename("template.md"), None);
        assert_eq!(parse_filename("README.md"), None);
        assert_eq!(parse_filename("001-short.md"), None);
        assert_eq!(parse_filename("0001-notes.txt"), None);
        assert_eq!(parse_filename("0001.md"), None);
    }
}
