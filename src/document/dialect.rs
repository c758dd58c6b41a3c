//! Status carriers
//!
//! Nygard documents keep status under a `## Status` heading; MADR documents
//! keep it in a `status:` frontmatter key. When both are present the heading
//! wins.

use crate::domain::Status;

use super::frontmatter::{frontmatter_status_value, has_frontmatter_status, replace_frontmatter_status};
use super::section::{extract_status_section_content, has_status_section, replace_status_section_content};

/// Where a document carries its status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `## Status` heading followed by free text
    Nygard,
    /// `status:` key in the leading YAML frontmatter
    Madr,
}

impl Dialect {
    /// Classifies a document, `None` when it has no status carrier
    pub fn detect(content: &str) -> Option<Self> {
        if has_status_section(content) {
            Some(Dialect::Nygard)
        } else if has_frontmatter_status(content) {
            Some(Dialect::Madr)
        } else {
            None
        }
    }

    /// Returns the raw status text (section body or frontmatter value)
    pub fn status_text(self, content: &str) -> String {
        match self {
            Dialect::Nygard => extract_status_section_content(content),
            Dialect::Madr => frontmatter_status_value(content),
        }
    }

    /// Overwrites the status text, leaving everything else untouched
    pub fn replace_status(self, content: &str, text: &str) -> String {
        match self {
            Dialect::Nygard => replace_status_section_content(content, text),
            Dialect::Madr => replace_frontmatter_status(content, text),
        }
    }

    /// Spelling of a status in this dialect
    pub fn format_status(self, status: Status) -> &'static str {
        match self {
            Dialect::Nygard => status.as_str(),
            Dialect::Madr => status.as_lower(),
        }
    }
}
