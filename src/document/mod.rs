//! Markdown document engine
//!
//! Reads and rewrites ADR documents as plain text. There is no markdown or
//! YAML parser underneath: each operation works on a precise byte range and
//! leaves the rest of the document untouched.

mod dialect;
mod frontmatter;
mod metadata;
mod render;
mod rewrite;
mod section;

pub use dialect::Dialect;
pub use frontmatter::{frontmatter_status_value, has_frontmatter_status, replace_frontmatter_status};
pub use metadata::{assemble, extract_metadata, parse_document, Metadata};
pub use render::render_template;
pub use rewrite::{set_superseded_by, set_supersedes, update_status};
pub use section::{
    append_to_status_section_content, extract_status_section_content, has_status_section,
    replace_status_section_content,
};
