//! Durable key-value storage for the calculator's persisted blobs.
//!
//! One JSON document per key, stored as a file in the platform config
//! directory. The trait seam exists so hydration can be exercised against
//! an in-memory double.

use std::collections::HashMap;
use std::path::PathBuf;
use std::{fs, io};

use directories::ProjectDirs;
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "LandedCost";
const APP_NAME: &str = "LandedCost";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// String-keyed durable storage.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key is absent or
    /// unreadable.
    fn get(
        &self,
        key: &str,
    ) -> Option<String>;

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes the key. Removing an absent key is not an error.
    fn remove(
        &mut self,
        key: &str,
    );
}

/// File-backed store: `<config dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store in the platform config directory, creating it when
    /// missing.
    pub fn open() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .ok_or(StoreError::StorageUnavailable)?;
        Self::with_dir(dirs.config_dir().to_path_buf())
    }

    /// Opens the store in an explicit directory (tests, portable installs).
    pub fn with_dir(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(
        &self,
        key: &str,
    ) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(
        &self,
        key: &str,
    ) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(
        &mut self,
        key: &str,
    ) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// In-memory store used as a test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(
        &self,
        key: &str,
    ) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(
        &self,
        key: &str,
    ) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(
        &mut self,
        key: &str,
    ) {
        self.entries.remove(key);
    }
}
