//! ADR status vocabulary
//!
//! The lifecycle is a closed set of five states. Input is matched
//! case-insensitively and tolerates trailing references such as
//! `Superseded by [ADR-0002](0002-x.md)`.

use serde::{Deserialize, Serialize};

use crate::error::AdrError;

/// Lifecycle state of an ADR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Status {
    /// Initial state of every new record
    #[default]
    Proposed,
    Accepted,
    Rejected,
    Deprecated,
    Superseded,
}

/// Display grouping of statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Pending,
    Active,
    Inactive,
}

impl Status {
    /// Returns all statuses in their canonical order
    ///
    /// The order is shown to users (JSON arrays, the numbered update menu)
    /// and must not change.
    pub fn all() -> &'static [Status] {
        &[
            Status::Proposed,
            Status::Accepted,
            Status::Rejected,
            Status::Deprecated,
            Status::Superseded,
        ]
    }

    /// Returns the capitalized name, e.g. `Accepted`
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Proposed => "Proposed",
            Status::Accepted => "Accepted",
            Status::Rejected => "Rejected",
            Status::Deprecated => "Deprecated",
            Status::Superseded => "Superseded",
        }
    }

    /// Returns the lower-case name used in YAML frontmatter
    pub fn as_lower(&self) -> &'static str {
        match self {
            Status::Proposed => "proposed",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::Deprecated => "deprecated",
            Status::Superseded => "superseded",
        }
    }

    pub fn category(&self) -> StatusCategory {
        match self {
            Status::Proposed => StatusCategory::Pending,
            Status::Accepted => StatusCategory::Active,
            Status::Rejected | Status::Deprecated | Status::Superseded => {
                StatusCategory::Inactive
            }
        }
    }
}

/// Returns the lower-case status names in canonical order
pub fn all_status_names() -> Vec<&'static str> {
    Status::all().iter().map(Status::as_lower).collect()
}

/// Parses free-form status text
///
/// Matches when the trimmed, lower-cased text equals a status name, or
/// starts with the name followed by a space or a comma (`superseded by ...`,
/// `proposed, supersedes ...`). Returns `None` for empty or unknown input.
pub fn parse_status(text: &str) -> Option<Status> {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    Status::all().iter().copied().find(|status| {
        let name = status.as_lower();
        match lower.strip_prefix(name) {
            Some(rest) => rest.is_empty() || rest.starts_with(' ') || rest.starts_with(','),
            None => false,
        }
    })
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = AdrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s).ok_or_else(|| AdrError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_known_statuses() {
        assert_eq!(parse_status("accepted"), Some(Status::Accepted));
        assert_eq!(parse_status("PROPOSED"), Some(Status::Proposed));
        assert_eq!(parse_status("Rejected"), Some(Status::Rejected));
        assert_eq!(parse_status("  deprecated \n"), Some(Status::Deprecated));
        assert_eq!(parse_status("superseded"), Some(Status::Superseded));
    }

    #[test]
    fn parse_tolerates_trailing_reference() {
        assert_eq!(parse_status("Superseded by ADR-0005"), Some(Status::Superseded));
        assert_eq!(parse_status("superseded by ..."), Some(Status::Superseded));
        assert_eq!(
            parse_status("proposed, supersedes [ADR-0001](0001-first.md)"),
            Some(Status::Proposed)
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(parse_status(""), None);
        assert_eq!(parse_status("   "), None);
        assert_eq!(parse_status("unknown"), None);
        assert_eq!(parse_status("acceptedly"), None);
        assert!("invalid-status".parse::<Status>().is_err());
    }

    #[test]
    fn categories() {
        assert_eq!(Status::Proposed.category(), StatusCategory::Pending);
        assert_eq!(Status::Accepted.category(), StatusCategory::Active);
        assert_eq!(Status::Rejected.category(), StatusCategory::Inactive);
        assert_eq!(Status::Deprecated.category(), StatusCategory::Inactive);
        assert_eq!(Status::Superseded.category(), StatusCategory::Inactive);
    }

    #[test]
    fn canonical_ordering() {
        assert_eq!(
            all_status_names(),
            vec!["proposed", "accepted", "rejected", "deprecated", "superseded"]
        );
        let names: Vec<String> = Status::all().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["Proposed", "Accepted", "Rejected", "Deprecated", "Superseded"]);
    }

    #[test]
    fn serializes_as_capitalized_name() {
        assert_eq!(serde_json::to_string(&Status::Accepted).unwrap(), "\"Accepted\"");
        assert_eq!(Status::default(), Status::Proposed);
    }

    proptest! {
        #[test]
        fn any_case_round_trips(idx in 0usize..5, mask in proptest::collection::vec(any::<bool>(), 10)) {
            let status = Status::all()[idx];
            let mixed: String = status
                .as_lower()
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();

            let parsed = parse_status(&mixed);
            prop_assert_eq!(parsed, Some(status));
            prop_assert_eq!(parsed.unwrap().to_string(), status.as_str());
        }
    }
}
