//! Workspace management
//!
//! A workspace is a directory holding `.adr.json`. It knows where the ADR
//! directory and template live and hands out a [`FileRepository`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AdrError, IoResultExt, Result};

use super::config::Config;
use super::repository::FileRepository;
use super::templates::template_content;

/// An initialized ADR workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens the workspace whose `.adr.json` is in `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = Config::load(&root)?;
        Ok(Self { root, config })
    }

    /// Opens the workspace at `start` or the nearest ancestor holding `.adr.json`
    pub fn discover(start: &Path) -> Result<Self> {
        let root = Config::find_root(start).ok_or_else(|| AdrError::ConfigNotFound(Config::path_in(start)))?;
        Self::open(root)
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let cwd = std::env::current_dir().at_path("reading", Path::new("."))?;
        Self::discover(&cwd)
    }

    /// Initializes a workspace in `root`
    ///
    /// Writes the named template to `<directory>/<template_file>` and saves
    /// `.adr.json`. Existing files are only overwritten with `force`; that
    /// check runs before anything is written.
    pub fn init(root: &Path, directory: &str, template: &str, template_file: &str, force: bool) -> Result<Self> {
        validate_template_file(template_file)?;
        let content = template_content(template)?;

        let config = Config::new(directory, template, template_file);
        let config_path = Config::path_in(root);
        let adr_dir = config.adr_dir(root);
        let template_path = adr_dir.join(template_file);

        if !force {
            for path in [&config_path, &template_path] {
                if path.exists() {
                    return Err(AdrError::AlreadyExists(path.clone()));
                }
            }
        }

        fs::create_dir_all(&adr_dir).at_path("creating directory", &adr_dir)?;
        fs::write(&template_path, content).at_path("writing template", &template_path)?;
        config.save(root)?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Returns the workspace root (the directory holding `.adr.json`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the ADR directory
    pub fn adr_dir(&self) -> PathBuf {
        self.config.adr_dir(&self.root)
    }

    /// Returns the template path
    pub fn template_path(&self) -> PathBuf {
        self.adr_dir().join(&self.config.template_file)
    }

    /// Returns a repository over the ADR directory
    pub fn repository(&self) -> FileRepository {
        FileRepository::new(self.adr_dir()).with_template_file(self.config.template_file.clone())
    }
}

/// Checks that a template file name is a bare `.md` file name
pub fn validate_template_file(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.contains(['/', '\\']) {
        "must not contain path separators"
    } else if Path::new(name).extension().map_or(true, |ext| ext != "md") {
        "must have .md extension"
    } else {
        return Ok(());
    };

    Err(AdrError::InvalidTemplateFile {
        name: name.to_string(),
        reason,
    })
}
