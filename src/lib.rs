//! adr-helper - Architecture Decision Records on disk
//!
//! Records are numbered markdown files in one directory, written in the
//! Nygard or MADR style. The crate parses and rewrites them in place,
//! keeps supersede links consistent, and exposes the collection through
//! the `adr` CLI and a small JSON API.

pub mod cli;
pub mod document;
pub mod domain;
pub mod error;
pub mod storage;
pub mod web;

pub use domain::{Adr, Status, SupersedesLink};
pub use error::{AdrError, Result};
