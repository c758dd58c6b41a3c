//! Error taxonomy shared by the document engine, storage, and the HTTP API
//!
//! Every error carries an [`ErrorKind`] so callers (the web layer in
//! particular) can branch on the category instead of matching message text.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Broad category of an [`AdrError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A record, file, or config is absent
    NotFound,
    /// Malformed input: config, status, title, template name, ...
    Invalid,
    /// Filesystem read/write failure
    Io,
    /// The operation needs a collaborator that is not configured
    Unsupported,
}

#[derive(Debug, Error)]
pub enum AdrError {
    #[error("ADR {0:04} not found")]
    NotFound(u32),

    #[error("config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("config invalid: {0}")]
    ConfigInvalid(String),

    #[error("invalid status {0:?}")]
    InvalidStatus(String),

    #[error("title {0:?} produces an empty slug")]
    EmptySlug(String),

    #[error("unknown template {name:?}, valid templates: {}", valid.join(", "))]
    UnknownTemplate { name: String, valid: Vec<&'static str> },

    #[error("invalid template file name {name:?}: {reason}")]
    InvalidTemplateFile { name: String, reason: &'static str },

    #[error("invalid ADR ID {0}: must be positive")]
    InvalidId(u32),

    #[error("{} already exists, use --force to overwrite", .0.display())]
    AlreadyExists(PathBuf),

    #[error("ADR {0:04} cannot supersede itself")]
    SelfSupersede(u32),

    #[error("no ADR number after {0}")]
    NumberExhausted(u32),

    #[error("no status section found: expected ## Status heading or status: in YAML frontmatter")]
    NoStatusSection,

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} not supported")]
    Unsupported(&'static str),
}

impl AdrError {
    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdrError::NotFound(_) | AdrError::ConfigNotFound(_) => ErrorKind::NotFound,
            AdrError::ConfigInvalid(_)
            | AdrError::InvalidStatus(_)
            | AdrError::EmptySlug(_)
            | AdrError::UnknownTemplate { .. }
            | AdrError::InvalidTemplateFile { .. }
            | AdrError::InvalidId(_)
            | AdrError::AlreadyExists(_)
            | AdrError::SelfSupersede(_)
            | AdrError::NumberExhausted(_)
            | AdrError::NoStatusSection => ErrorKind::Invalid,
            AdrError::Io { .. } => ErrorKind::Io,
            AdrError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    /// Returns true if the error means "absent"
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T, E = AdrError> = std::result::Result<T, E>;

/// Attaches a path to `std::io` failures
pub(crate) trait IoResultExt<T> {
    fn at_path(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| AdrError::Io {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(AdrError::NotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(AdrError::InvalidStatus("x".into()).kind(), ErrorKind::Invalid);
        assert_eq!(AdrError::NoStatusSection.kind(), ErrorKind::Invalid);
        assert_eq!(AdrError::Unsupported("supersede").kind(), ErrorKind::Unsupported);

        let io: Result<()> = Err(std::io::Error::other("boom")).at_path("reading", Path::new("x.md"));
        assert_eq!(io.unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn messages_carry_context() {
        assert_eq!(AdrError::NotFound(7).to_string(), "ADR 0007 not found");
        assert_eq!(AdrError::InvalidStatus("bogus".into()).to_string(), "invalid status \"bogus\"");

        let err = std::fs::read_to_string("/nonexistent/0001-x.md")
            .at_path("reading", Path::new("/nonexistent/0001-x.md"))
            .unwrap_err();
        assert!(err.to_string().starts_with("reading /nonexistent/0001-x.md:"));
    }
}
