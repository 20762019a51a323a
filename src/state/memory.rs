//! In-memory state store

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{StateError, StateResult};
use super::StateStore;

/// In-memory state store, used in tests and for single-process hosts
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> StateResult<Option<Value>> {
        let values = self.values.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StateResult<()> {
        let mut values = self.values.write().map_err(|_| StateError::LockPoisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> StateResult<()> {
        let mut values = self.values.write().map_err(|_| StateError::LockPoisoned)?;
        values.remove(key);
        Ok(())
    }
}
