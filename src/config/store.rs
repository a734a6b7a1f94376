//! Disk-backed configuration store
//!
//! `tags.json` is owned and edited by the user. The store only ever reads it: every
//! [`ConfigStore::reload`] re-parses the file and replaces the held document only
//! when the new one is valid.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::document::ConfigDocument;
use super::error::ConfigError;
use super::quick_tag::QuickTag;
use crate::constants::{app, config, env};

/// Owns the path to `tags.json` and the last successfully loaded document
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: ConfigDocument,
}

impl ConfigStore {
    /// Default location: `<data dir>/anki-quick-tags/<user files>/tags.json`
    ///
    /// `ANKI_QUICK_TAGS_DIR` replaces `<data dir>/anki-quick-tags`, and
    /// `ANKI_ADDON_DEVELOPMENT` selects the development user files directory.
    pub fn default_path() -> PathBuf {
        let mut path = match std::env::var_os(env::DATA_DIR_OVERRIDE) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
                dir.push(app::DATA_DIR);
                dir
            }
        };

        if std::env::var_os(env::DEVELOPMENT_MODE).is_some() {
            path.push(config::USER_FILES_DEV);
        } else {
            path.push(config::USER_FILES);
        }
        path.push(config::FILENAME);
        path
    }

    /// Load the configuration at `path`, failing if it is missing or invalid
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let document = Self::load(&path)?;
        Ok(Self { path, document })
    }

    /// Read and validate `path` without touching any store
    pub fn load(path: &Path) -> Result<ConfigDocument, ConfigError> {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::Missing { dir });
            }
            Err(source) => return Err(ConfigError::Unreadable { dir, source }),
        };

        let value: Value = serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Malformed { dir, source })?;

        let document = ConfigDocument::from_value(value)?;
        debug!(
            path = %path.display(),
            quick_tags = document.quick_tags.len(),
            "Loaded quick-tag configuration"
        );
        Ok(document)
    }

    /// Re-read the file. On success the held document is replaced; on failure it is
    /// left as it was and the error is returned.
    pub fn reload(&mut self) -> Result<&ConfigDocument, ConfigError> {
        self.document = Self::load(&self.path)?;
        Ok(&self.document)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn quick_tags(&self) -> &[QuickTag] {
        &self.document.quick_tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(config::FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_open_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "tags": [
                    { "name": "Tag02", "shortcut": "Ctrl+2" },
                    { "name": "Tag01", "shortcut": "Ctrl+1" }
                ],
                "other-tags": { "visible": false, "limit": 3 }
            }"#,
        );

        let store = ConfigStore::open(&path).unwrap();
        let names: Vec<_> = store.quick_tags().iter().map(QuickTag::name).collect();
        assert_eq!(names, vec!["Tag01", "Tag02"]);
        assert!(!store.document().display.other_tags_visible);
        assert_eq!(store.document().display.other_tags_limit, 3);
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join(config::FILENAME);

        match ConfigStore::open(&path).unwrap_err() {
            ConfigError::Missing { dir: missing_in } => {
                assert_eq!(missing_in, dir.path().join("absent"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{ "tags": [ { "name": "Tag01" }, ] "#);

        let err = ConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
        assert!(err.to_string().starts_with("Cannot read tags.json in "));
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{ "other-tags": { "limit": "10" } }"#);

        assert!(matches!(
            ConfigStore::open(&path),
            Err(ConfigError::InvalidType { .. })
        ));
    }

    #[test]
    fn test_reload_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{ "tags": [{ "name": "Tag01", "shortcut": "Ctrl+1" }] }"#,
        );

        let mut store = ConfigStore::open(&path).unwrap();
        let first = store.reload().unwrap().clone();
        let second = store.reload().unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(first.quick_tags, store.quick_tags());
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{ "tags": [{ "name": "Tag01" }] }"#);

        let mut store = ConfigStore::open(&path).unwrap();
        write_config(
            &dir,
            r#"{ "tags": [{ "name": "Tag01" }, { "name": "Tag00" }] }"#,
        );

        let names: Vec<_> = store.reload().unwrap().quick_tag_names().collect();
        assert_eq!(names, vec!["Tag00", "Tag01"]);
    }

    #[test]
    fn test_failed_reload_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{ "tags": [{ "name": "Tag01" }] }"#);

        let mut store = ConfigStore::open(&path).unwrap();
        let before = store.document().clone();

        write_config(&dir, r#"{ "tags": [{ "shortcut": "Ctrl+1" }] }"#);
        assert!(matches!(
            store.reload(),
            Err(ConfigError::MissingName { index: 0 })
        ));
        assert_eq!(store.document(), &before);

        fs::remove_file(&path).unwrap();
        assert!(matches!(store.reload(), Err(ConfigError::Missing { .. })));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_default_path_ends_with_tags_json() {
        let path = ConfigStore::default_path();
        assert_eq!(path.file_name().unwrap(), config::FILENAME);
    }
}
