//! Built-in ADR templates, embedded at compile time

use crate::error::{AdrError, Result};

const NYGARD: &str = include_str!("../../templates/nygard.md");
const MADR_MINIMAL: &str = include_str!("../../templates/madr-minimal.md");
const MADR_FULL: &str = include_str!("../../templates/madr-full.md");

pub const DEFAULT_TEMPLATE: &str = "nygard";

const TEMPLATES: &[(&str, &str)] = &[
    ("nygard", NYGARD),
    ("madr-minimal", MADR_MINIMAL),
    ("madr-full", MADR_FULL),
];

/// Returns the names of the built-in templates
pub fn valid_template_names() -> Vec<&'static str> {
    TEMPLATES.iter().map(|(name, _)| *name).collect()
}

/// Returns the content of a built-in template
pub fn template_content(name: &str) -> Result<&'static str> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, content)| *content)
        .ok_or_else(|| AdrError::UnknownTemplate {
            name: name.to_string(),
            valid: valid_template_names(),
        })
}
