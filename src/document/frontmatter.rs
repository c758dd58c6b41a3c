//! YAML frontmatter boundaries and the `status:` key
//!
//! A frontmatter block exists only when the document starts with a `---`
//! line and a later line is exactly `---`. Without the closing delimiter the
//! leading `---` is ordinary body text. Lookups and rewrites never look
//! outside the block, so a `status:` line in the body is left alone.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^status:.*$").unwrap());
static STATUS_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^status:[ \t]*(.*)$").unwrap());
static DATE_VALUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^date:[ \t]*(.+)$").unwrap());

/// Byte layout of a document with frontmatter
///
/// ```text
/// ---\n          <- opening delimiter
/// status: "x"\n  <- yaml (yaml_start..yaml_end)
/// ---\n          <- closing delimiter
/// # Title        <- body (body_start..)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frontmatter {
    yaml_start: usize,
    yaml_end: usize,
    body_start: usize,
}

impl Frontmatter {
    /// Locates the frontmatter block, if any
    pub(crate) fn locate(content: &str) -> Option<Self> {
        let first_break = content.find('\n')?;
        if trim_cr(&content[..first_break]) != "---" {
            return None;
        }

        let yaml_start = first_break + 1;
        let mut offset = yaml_start;
        for line in content[yaml_start..].split_inclusive('\n') {
            if trim_cr(line.trim_end_matches('\n')) == "---" {
                return Some(Self {
                    yaml_start,
                    yaml_end: offset,
                    body_start: offset + line.len(),
                });
            }
            offset += line.len();
        }

        None
    }

    pub(crate) fn yaml<'a>(&self, content: &'a str) -> &'a str {
        &content[self.yaml_start..self.yaml_end]
    }

    pub(crate) fn body<'a>(&self, content: &'a str) -> &'a str {
        &content[self.body_start..]
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Returns the document after the frontmatter block, or all of it
pub(crate) fn body_after_frontmatter(content: &str) -> &str {
    match Frontmatter::locate(content) {
        Some(fm) => fm.body(content),
        None => content,
    }
}

/// Checks for a `status:` key inside the frontmatter block
pub fn has_frontmatter_status(content: &str) -> bool {
    Frontmatter::locate(content).is_some_and(|fm| STATUS_LINE.is_match(fm.yaml(content)))
}

/// Returns the frontmatter `status:` value with surrounding quotes stripped
///
/// Empty when there is no frontmatter or no status key.
pub fn frontmatter_status_value(content: &str) -> String {
    Frontmatter::locate(content)
        .and_then(|fm| STATUS_VALUE.captures(fm.yaml(content)))
        .map(|caps| strip_quotes(caps[1].trim()).to_string())
        .unwrap_or_default()
}

/// Returns the frontmatter `date:` value with surrounding quotes stripped
pub(crate) fn frontmatter_date_value(content: &str) -> Option<String> {
    let fm = Frontmatter::locate(content)?;
    let caps = DATE_VALUE.captures(fm.yaml(content))?;
    Some(strip_quotes(caps[1].trim()).to_string())
}

/// Rewrites the `status:` line inside the frontmatter block to
/// `status: "<value>"`
///
/// Content without a frontmatter block is returned unchanged.
pub fn replace_frontmatter_status(content: &str, value: &str) -> String {
    let Some(fm) = Frontmatter::locate(content) else {
        return content.to_string();
    };

    let line = format!("status: \"{value}\"");
    let yaml = STATUS_LINE.replace_all(fm.yaml(content), NoExpand(&line));

    let mut out = String::with_capacity(content.len() + line.len());
    out.push_str(&content[..fm.yaml_start]);
    out.push_str(&yaml);
    out.push_str(&content[fm.yaml_end..]);
    out
}

/// Removes one pair of surrounding double quotes
pub(crate) fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MADR: &str = "---\nstatus: \"accepted\"\ndate: 2024-01-01\n---\n\n# 1. Use Go\n\nSome context.\n";

    #[test]
    fn locate_splits_yaml_and_body() {
        let fm = Frontmatter::locate(MADR).unwrap();
        assert_eq!(fm.yaml(MADR), "status: \"accepted\"\ndate: 2024-01-01\n");
        assert_eq!(fm.body(MADR), "\n# 1. Use Go\n\nSome context.\n");
    }

    #[test]
    fn locate_requires_closing_delimiter() {
        assert!(Frontmatter::locate("---\nstatus: accepted\n\n# Title\n").is_none());
    }

    #[test]
    fn locate_requires_leading_delimiter() {
        assert!(Frontmatter::locate("# Title\n---\nstatus: x\n---\n").is_none());
        assert!(Frontmatter::locate("").is_none());
    }

    #[test]
    fn closing_delimiter_must_be_exact() {
        let content = "---\nstatus: x\n----\nmore\n---\nbody\n";
        let fm = Frontmatter::locate(content).unwrap();
        assert_eq!(fm.yaml(content), "status: x\n----\nmore\n");
        assert_eq!(fm.body(content), "body\n");
    }

    #[test]
    fn closing_delimiter_at_eof() {
        let content = "---\nstatus: x\n---";
        let fm = Frontmatter::locate(content).unwrap();
        assert_eq!(fm.yaml(content), "status: x\n");
        assert_eq!(fm.body(content), "");
    }

    #[test]
    fn status_probe_and_value() {
        assert!(has_frontmatter_status(MADR));
        assert_eq!(frontmatter_status_value(MADR), "accepted");

        let unquoted = "---\nstatus: proposed\n---\n";
        assert_eq!(frontmatter_status_value(unquoted), "proposed");
    }

    #[test]
    fn status_in_body_is_not_frontmatter() {
        let content = "# 1. Use Go\n\nstatus: accepted\n";
        assert!(!has_frontmatter_status(content));
        assert_eq!(frontmatter_status_value(content), "");
    }

    #[test]
    fn replace_is_scoped_to_block() {
        let content = "---\nstatus: \"accepted\"\ndate: 2024-01-01\n---\n\n# 1. X\n\nstatus: this should not change\n";
        let result = replace_frontmatter_status(content, "rejected");
        assert_eq!(
            result,
            "---\nstatus: \"rejected\"\ndate: 2024-01-01\n---\n\n# 1. X\n\nstatus: this should not change\n"
        );
    }

    #[test]
    fn replace_value_is_literal() {
        let result = replace_frontmatter_status(MADR, "cost $1 and $name");
        assert!(result.contains("status: \"cost $1 and $name\""));
    }

    #[test]
    fn replace_without_frontmatter_is_noop() {
        let content = "# 1. X\n\nstatus: x\n";
        assert_eq!(replace_frontmatter_status(content, "y"), content);
    }

    #[test]
    fn date_value_strips_quotes() {
        let content = "---\ndate: \"2024-03-20\"\n---\n";
        assert_eq!(frontmatter_date_value(content).as_deref(), Some("2024-03-20"));
    }
}
