//! Workspace configuration
//!
//! Configuration is stored in `.adr.json` at the workspace root:
//!
//! ```json
//! {
//!   "version": "1",
//!   "directory": "docs/adr",
//!   "template": "nygard",
//!   "templateFile": "template.md"
//! }
//! ```

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AdrError, IoResultExt, Result};

pub const CONFIG_FILE_NAME: &str = ".adr.json";
pub const CONFIG_VERSION: &str = "1";
pub const DEFAULT_TEMPLATE_FILE: &str = "template.md";

/// Contents of `.adr.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub version: String,

    /// ADR directory, relative to the config file or absolute
    #[serde(default)]
    pub directory: String,

    /// Template format used at init (`nygard`, `madr-minimal`, `madr-full`)
    #[serde(default)]
    pub template: String,

    /// Template file inside the ADR directory
    #[serde(default = "default_template_file")]
    pub template_file: String,
}

fn default_template_file() -> String {
    DEFAULT_TEMPLATE_FILE.to_string()
}

impl Config {
    pub fn new(directory: impl Into<String>, template: impl Into<String>, template_file: impl Into<String>) -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            directory: directory.into(),
            template: template.into(),
            template_file: template_file.into(),
        }
    }

    /// Returns the config file path for a workspace root
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Loads and validates `.adr.json` from `root`
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path_in(root);

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Err(AdrError::ConfigNotFound(path)),
            Err(e) => return Err(e).at_path("reading", &path),
        };

        let config: Config = serde_json::from_str(&data)
            .map_err(|e| AdrError::ConfigInvalid(format!("parsing {}: {e}", path.display())))?;

        if config.version != CONFIG_VERSION {
            return Err(AdrError::ConfigInvalid(format!(
                "unsupported config version {:?}",
                config.version
            )));
        }
        if config.directory.is_empty() {
            return Err(AdrError::ConfigInvalid("directory must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Writes `.adr.json` into `root` as indented JSON, always at the current version
    pub fn save(&self, root: &Path) -> Result<()> {
        let mut out = self.clone();
        out.version = CONFIG_VERSION.to_string();

        let mut data = serde_json::to_string_pretty(&out)
            .map_err(|e| AdrError::ConfigInvalid(format!("serializing config: {e}")))?;
        data.push('\n');

        let path = Self::path_in(root);
        fs::write(&path, data).at_path("writing", &path)
    }

    /// Finds the workspace root by looking for `.adr.json` in `start` and its ancestors
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_FILE_NAME).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolves the ADR directory against the workspace root
    pub fn adr_dir(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.directory);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let config = Config::new("docs/adr", "nygard", "template.md");
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn save_writes_indented_json_with_newline() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("adr", "madr-full", "tpl.md");
        config.version = "0".to_string();
        config.save(dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(
            raw,
            "{\n  \"version\": \"1\",\n  \"directory\": \"adr\",\n  \"template\": \"madr-full\",\n  \"templateFile\": \"tpl.md\"\n}\n"
        );
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, AdrError::ConfigNotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{not json").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(AdrError::ConfigInvalid(_))));
    }

    #[test]
    fn load_rejects_wrong_version() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"version":"2","directory":"adr","template":"nygard"}"#,
        )
        .unwrap();
        assert!(matches!(Config::load(dir.path()), Err(AdrError::ConfigInvalid(_))));
    }

    #[test]
    fn load_rejects_empty_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"version":"1","directory":"","template":"nygard"}"#,
        )
        .unwrap();
        assert!(matches!(Config::load(dir.path()), Err(AdrError::ConfigInvalid(_))));
    }

    #[test]
    fn template_file_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"version":"1","directory":"adr","template":"nygard"}"#,
        )
        .unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().template_file, "template.md");
    }

    #[test]
    fn find_root_walks_up() {
        let dir = TempDir::new().unwrap();
        Config::new("adr", "nygard", "template.md").save(dir.path()).unwrap();

        let sub = dir.path().join("a").join("b");
        fs::create_dir_all(&sub).unwrap();

        assert_eq!(Config::find_root(&sub), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn adr_dir_relative_to_root() {
        let config = Config::new("docs/adr", "nygard", "template.md");
        assert_eq!(config.adr_dir(Path::new("/work")), PathBuf::from("/work/docs/adr"));

        let absolute = Config::new("/elsewhere/adr", "nygard", "template.md");
        assert_eq!(absolute.adr_dir(Path::new("/work")), PathBuf::from("/elsewhere/adr"));
    }
}
