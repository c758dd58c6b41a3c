//! # Command-Line Interface
//!
//! The `adr` binary: parsing, command handlers, and terminal output.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create the ADR directory, template, and `.adr.json` |
//! | `new` | Create a record, optionally superseding others |
//! | `update` | Change a record's status |
//! | `list` | Table of records, or counts by status |
//! | `show` | Render one record for the terminal |
//! | `serve` | Run the JSON API |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! adr --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod adr;
mod app;
mod format;
mod output;
mod prompt;
mod serve;

pub use app::{run, Cli, Commands};
pub use format::{format_adr, status_color};
pub use output::{Output, OutputFormat};
pub use prompt::{levenshtein, prompt_status, resolve_status};
