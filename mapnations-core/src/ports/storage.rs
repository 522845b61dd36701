//! Local storage port - the browser-style key/value store
//!
//! Values are JSON documents stored as strings. There are no transactions:
//! services do read-modify-write per key.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;

/// Key/value storage abstraction
///
/// Implementations (adapters) provide persistence. Keys used by the
/// application: `users`, `user`, `favorites_<username>`, `lastRoute`.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// Read and deserialize the JSON value under `key`
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
