//! # Storage Layer
//!
//! Persistence for ADR workspaces, using plain files that diff well in git.
//!
//! ## Layout
//!
//! ```text
//! .adr.json                  # Workspace configuration
//! docs/adr/                  # ADR directory (configurable)
//! ├── template.md            # Template used by `adr new`
//! ├── 0001-use-go-for-cli.md # Records: NNNN-slug.md
//! └── 0002-use-rust.md
//! ```
//!
//! ## Concurrency Safety
//!
//! - No locking; concurrent writers race and the last write wins
//! - All record writes are atomic (temp file + rename)
//! - Two-file operations write the superseding record first
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point: config discovery, init, repository access
//! - [`FileRepository`] - Reads and rewrites ADR files
//! - [`Config`] - The `.adr.json` file

mod config;
mod repository;
mod templates;
mod workspace;

pub use config::{Config, CONFIG_FILE_NAME, CONFIG_VERSION, DEFAULT_TEMPLATE_FILE};
pub use repository::{CreatedAdr, FileRepository, Repository, StatusUpdater, Superseder};
pub use templates::{template_content, valid_template_names, DEFAULT_TEMPLATE};
pub use workspace::{validate_template_file, Workspace};
