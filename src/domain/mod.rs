//! Domain models for ADR management
//!
//! Contains the record model and its vocabulary without any I/O concerns.

mod record;
mod slug;
mod status;

pub use record::{count_by_status, filter_by_query, Adr, AdrDetail, AdrSummary, StatusCounts, SupersedesLink};
pub use slug::{format_filename, parse_filename, slugify};
pub use status::{all_status_names, parse_status, Status, StatusCategory};
