//! File-backed ADR repository
//!
//! Records live as `NNNN-slug.md` files in a single directory. Reads parse
//! each file with the document engine; writes go through a temp file and a
//! rename so a crashed write never leaves a truncated record behind.
//!
//! Multi-file operations compute every new text before touching disk, then
//! write the superseding (or newly created) record first. If a later write
//! fails, no record claims to be superseded by something that was never
//! written.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{parse_document, render_template, set_superseded_by, set_supersedes, update_status};
use crate::domain::{format_filename, parse_filename, parse_status, Adr, SupersedesLink};
use crate::error::{AdrError, IoResultExt, Result};

use super::config::DEFAULT_TEMPLATE_FILE;

/// Read access to a set of ADRs
pub trait Repository: Send + Sync {
    /// Returns every parseable record, sorted by number
    fn list(&self) -> Result<Vec<Adr>>;

    /// Returns one record with its content attached
    fn get(&self, number: u32) -> Result<Adr>;

    /// Returns the number the next record should take
    fn next_number(&self) -> Result<u32>;
}

/// Changes the status of a record
pub trait StatusUpdater: Send + Sync {
    fn update_status(&self, number: u32, status: &str) -> Result<Adr>;
}

/// Links two records as superseded / superseding
pub trait Superseder: Send + Sync {
    /// Marks `superseded` as replaced by `superseding`; returns the updated
    /// superseded record
    fn supersede(&self, superseded: u32, superseding: u32) -> Result<Adr>;
}

/// Result of [`FileRepository::create`]
#[derive(Debug, Clone)]
pub struct CreatedAdr {
    pub path: PathBuf,
    pub record: Adr,
    /// Files rewritten as superseded by the new record, in write order
    pub superseded: Vec<PathBuf>,
}

/// ADR repository over a directory of markdown files
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
    template_file: String,
}

impl FileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
        }
    }

    /// Sets the template used by [`FileRepository::create`]
    pub fn with_template_file(mut self, name: impl Into<String>) -> Self {
        self.template_file = name.into();
        self
    }

    /// Returns the ADR directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the template path
    pub fn template_path(&self) -> PathBuf {
        self.dir.join(&self.template_file)
    }

    /// Returns `(number, filename)` for every ADR file, in directory order
    fn entries(&self) -> Result<Vec<(u32, String)>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.dir).at_path("reading directory", &self.dir)? {
            let entry = entry.at_path("reading directory", &self.dir)?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(number) = parse_filename(&name) {
                entries.push((number, name));
            }
        }

        Ok(entries)
    }

    /// Returns the filename of the ADR with the given number
    pub fn find_adr_file(&self, number: u32) -> Result<String> {
        self.entries()?
            .into_iter()
            .find(|(n, _)| *n == number)
            .map(|(_, name)| name)
            .ok_or(AdrError::NotFound(number))
    }

    fn read(&self, filename: &str) -> Result<String> {
        let path = self.dir.join(filename);
        fs::read_to_string(&path).at_path("reading", &path)
    }

    /// Creates a new ADR from the directory's template
    ///
    /// `supersedes` holds the numbers of existing records the new one
    /// replaces; duplicates are ignored and each must be positive and exist.
    /// Nothing is written unless every rewrite can be computed.
    pub fn create(&self, title: &str, supersedes: &[u32]) -> Result<CreatedAdr> {
        let ids = dedup_ids(supersedes)?;

        let template_path = self.template_path();
        let template = fs::read_to_string(&template_path).at_path("reading template", &template_path)?;

        let number = self.next_number()?;
        let filename = format_filename(number, title)?;
        let record = Adr::new(number, title);
        let mut rendered = render_template(&template, &record);

        let new_link = SupersedesLink::new(number, filename.clone());
        let mut rewrites = Vec::with_capacity(ids.len());
        let mut links = Vec::with_capacity(ids.len());

        for id in ids {
            let old_file = self.find_adr_file(id)?;
            let old_content = self.read(&old_file)?;
            let updated = set_superseded_by(&old_content, &new_link)?;

            rewrites.push((self.dir.join(&old_file), updated));
            links.push(SupersedesLink::new(id, old_file));
        }

        if !links.is_empty() {
            rendered = set_supersedes(&rendered, &links)?;
        }

        let path = self.dir.join(&filename);
        write_atomic(&path, &rendered)?;

        let mut superseded = Vec::with_capacity(rewrites.len());
        for (old_path, content) in rewrites {
            write_atomic(&old_path, &content)?;
            superseded.push(old_path);
        }

        Ok(CreatedAdr {
            path,
            record: record.with_content(rendered),
            superseded,
        })
    }
}

impl Repository for FileRepository {
    fn list(&self) -> Result<Vec<Adr>> {
        let mut records = Vec::new();

        for (number, name) in self.entries()? {
            let content = match self.read(&name) {
                Ok(content) => content,
                Err(e) => {
                    debug!(file = %name, error = %e, "skipping unreadable ADR");
                    continue;
                }
            };

            match parse_document(&content, number) {
                Ok(mut record) => {
                    record.content = None;
                    records.push(record);
                }
                Err(e) => debug!(file = %name, error = %e, "skipping unparseable ADR"),
            }
        }

        records.sort_by_key(|r| r.number);
        Ok(records)
    }

    fn get(&self, number: u32) -> Result<Adr> {
        let filename = self.find_adr_file(number)?;
        let content = self.read(&filename)?;
        parse_document(&content, number)
    }

    fn next_number(&self) -> Result<u32> {
        let max = self.entries()?.into_iter().map(|(n, _)| n).max().unwrap_or(0);
        max.checked_add(1).ok_or(AdrError::NumberExhausted(max))
    }
}

impl StatusUpdater for FileRepository {
    fn update_status(&self, number: u32, status: &str) -> Result<Adr> {
        if parse_status(status).is_none() {
            return Err(AdrError::InvalidStatus(status.to_string()));
        }

        let filename = self.find_adr_file(number)?;
        let content = self.read(&filename)?;
        let updated = update_status(&content, status)?;

        write_atomic(&self.dir.join(&filename), &updated)?;
        debug!(file = %filename, status, "updated status");

        parse_document(&updated, number)
    }
}

impl Superseder for FileRepository {
    fn supersede(&self, superseded: u32, superseding: u32) -> Result<Adr> {
        if superseded == superseding {
            return Err(AdrError::SelfSupersede(superseded));
        }

        let superseded_file = self.find_adr_file(superseded)?;
        let superseding_file = self.find_adr_file(superseding)?;

        let superseded_content = self.read(&superseded_file)?;
        let superseding_content = self.read(&superseding_file)?;

        let updated_superseded = set_superseded_by(
            &superseded_content,
            &SupersedesLink::new(superseding, superseding_file.clone()),
        )?;
        let updated_superseding = set_supersedes(
            &superseding_content,
            &[SupersedesLink::new(superseded, superseded_file.clone())],
        )?;

        write_atomic(&self.dir.join(&superseding_file), &updated_superseding)?;
        write_atomic(&self.dir.join(&superseded_file), &updated_superseded)?;
        debug!(superseded = %superseded_file, superseding = %superseding_file, "superseded");

        parse_document(&updated_superseded, superseded)
    }
}

/// Validates, deduplicates and sorts record numbers
fn dedup_ids(ids: &[u32]) -> Result<Vec<u32>> {
    let mut unique = BTreeSet::new();
    for &id in ids {
        if id == 0 {
            return Err(AdrError::InvalidId(id));
        }
        unique.insert(id);
    }
    Ok(unique.into_iter().collect())
}

/// Writes a file atomically (temp file + rename)
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("md.tmp");

    fs::write(&temp_path, content).at_path("writing", &temp_path)?;
    fs::rename(&temp_path, path).at_path("renaming", &temp_path)?;

    Ok(())
}
