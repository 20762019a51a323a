//! # Key-Value State
//!
//! Durable key-value storage for values that must survive a process
//! restart but are cheap to regenerate, such as the route name index.
//! Writes are last-writer-wins overwrites of a whole key.

mod errors;
mod file;
mod memory;

pub use errors::{StateError, StateResult};
pub use file::FileStateStore;
pub use memory::MemoryStateStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Key-value state store
pub trait StateStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StateResult<Option<Value>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: Value) -> StateResult<()>;

    /// Remove `key` if present
    fn delete(&self, key: &str) -> StateResult<()>;
}

/// Serialize `value` and store it under `key`
pub fn set_typed<T: Serialize>(store: &dyn StateStore, key: &str, value: &T) -> StateResult<()> {
    let value = serde_json::to_value(value).map_err(|source| StateError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, value)
}

/// Read and deserialize the value stored under `key`
pub fn get_typed<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> StateResult<Option<T>> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StateError::Serialization {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}
