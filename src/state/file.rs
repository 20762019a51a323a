//! JSON file-backed state store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use super::errors::{StateError, StateResult};
use super::StateStore;

/// State store persisting every key into a single JSON object on disk
///
/// Each write rewrites the whole file through a temporary sibling and a
/// rename, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> StateResult<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StateError::Read {
            path: self.path.display().to_string(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StateError::Serialization {
            key: self.path.display().to_string(),
            source,
        })
    }

    fn save_all(&self, values: &BTreeMap<String, Value>) -> StateResult<()> {
        let write_err = |source| StateError::Write {
            path: self.path.display().to_string(),
            source,
        };

        let content = serde_json::to_string_pretty(values).map_err(|source| {
            StateError::Serialization {
                key: self.path.display().to_string(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> StateResult<Option<Value>> {
        let _guard = self.lock.lock().map_err(|_| StateError::LockPoisoned)?;
        Ok(self.load_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> StateResult<()> {
        let _guard = self.lock.lock().map_err(|_| StateError::LockPoisoned)?;
        let mut values = self.load_all()?;
        values.insert(key.to_string(), value);
        self.save_all(&values)
    }

    fn delete(&self, key: &str) -> StateResult<()> {
        let _guard = self.lock.lock().map_err(|_| StateError::LockPoisoned)?;
        let mut values = self.load_all()?;
        if values.remove(key).is_some() {
            self.save_all(&values)?;
        }
        Ok(())
    }
}
