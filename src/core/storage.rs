//! JSON values over a string key-value store.
//!
//! Failures never propagate out of these helpers: writes report `false`, reads
//! fall back to the caller's default, and both log the cause.

use crate::domain::ports::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug)]
pub struct JsonStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> JsonStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// 序列化後寫入；失敗時記錄錯誤並回傳 false
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize value for key '{}': {}", key, e);
                return false;
            }
        };

        match self.store.set_item(key, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to write key '{}' to storage: {}", key, e);
                false
            }
        }
    }

    /// Missing or empty entries return `default` silently; unreadable ones log first.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return default,
            Err(e) => {
                tracing::error!("Failed to read key '{}' from storage: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to parse stored value for key '{}': {}", key, e);
                default
            }
        }
    }

    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key, T::default())
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            tracing::error!("Failed to remove key '{}' from storage: {}", key, e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear storage: {}", e);
        }
    }
}
