// SPDX-License-Identifier: MPL-2.0
//! Directory-backed store: one `<key>.json` file per key.
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous value readable.

use super::KeyValueStore;
use crate::app::paths;
use crate::error::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const VALUE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`. The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens a store in the resolved application data directory.
    ///
    /// See [`paths::get_app_data_dir_with_override`] for the resolution order.
    pub fn open_default(override_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(override_dir).map(Self::new)
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{VALUE_EXTENSION}"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.value_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_error = |err: std::io::Error| StorageError::Write {
            key: key.to_string(),
            message: err.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(write_error)?;

        let target = self.value_path(key);
        let staging = target.with_extension(format!("{VALUE_EXTENSION}.tmp"));
        fs::write(&staging, value).map_err(write_error)?;
        fs::rename(&staging, &target).map_err(write_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_then_get_round_trips() {
        let temp_dir = tempdir().expect("create temp dir");
        let mut store = FileStore::new(temp_dir.path());

        store.set("artworks", "[]").expect("write");

        assert_eq!(store.get("artworks").expect("read").as_deref(), Some("[]"));
        assert!(temp_dir.path().join("artworks.json").exists());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let temp_dir = tempdir().expect("create temp dir");
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get("profile").expect("read"), None);
    }

    #[test]
    fn set_creates_nested_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested = temp_dir.path().join("nested").join("deeply");
        let mut store = FileStore::new(&nested);

        store.set("profile", "{}").expect("write");

        assert!(nested.join("profile.json").exists());
        assert!(!nested.join("profile.json.tmp").exists());
    }

    #[test]
    fn set_replaces_previous_value() {
        let temp_dir = tempdir().expect("create temp dir");
        let mut store = FileStore::new(temp_dir.path());

        store.set("likedArtworkIds", "[\"a\"]").expect("write");
        store.set("likedArtworkIds", "[]").expect("write");

        assert_eq!(
            store.get("likedArtworkIds").expect("read").as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn write_into_a_file_path_fails_with_write_error() {
        let temp_dir = tempdir().expect("create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write blocker");
        let mut store = FileStore::new(&blocker);

        let err = store.set("artworks", "[]").unwrap_err();

        assert!(matches!(err, StorageError::Write { ref key, .. } if key == "artworks"));
    }
}
