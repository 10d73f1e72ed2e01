//! Local cache tier
//!
//! Synchronous JSON storage on top of a [`PlatformStorage`]. Every read is
//! defensive: unparsable entries and entries whose container shape does not
//! match the caller's fallback are purged and the fallback is returned. Nothing
//! here ever returns an error to the caller; failures are logged and absorbed.

use crate::platform::NoopStorage;
use crate::ports::PlatformStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Raw contents that mean "nothing stored"
const ABSENT_SENTINELS: &[&str] = &["", "undefined", "null"];

#[derive(Clone)]
pub struct LocalCache {
    storage: Arc<dyn PlatformStorage>,
}

impl LocalCache {
    pub fn new(storage: Arc<dyn PlatformStorage>) -> Self {
        Self { storage }
    }

    /// A cache for contexts without local storage: loads return the fallback
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopStorage))
    }

    pub fn is_enabled(&self) -> bool {
        self.storage.is_available()
    }

    /// Load the stored JSON value for `key`, or `fallback`
    pub fn load_value(&self, key: &str, fallback: Value) -> Value {
        self.read(key, &fallback).unwrap_or(fallback)
    }

    /// Load and deserialize the entry for `key`, or `fallback`.
    ///
    /// The fallback doubles as the expected shape: an array fallback only
    /// accepts a stored array, an object fallback only a stored object. An entry
    /// that does not deserialize into `T` is treated as corrupt as well.
    pub fn load<T>(&self, key: &str, fallback: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let shape = match serde_json::to_value(&fallback) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to encode fallback for {}: {}", key, e);
                return fallback;
            }
        };

        let Some(value) = self.read(key, &shape) else {
            return fallback;
        };

        match serde_json::from_value::<T>(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Discarding {} from local storage, unexpected schema: {}", key, e);
                self.purge(key);
                fallback
            }
        }
    }

    /// Store `value` as JSON; `null` removes the entry
    pub fn save_value(&self, key: &str, value: &Value) {
        if !self.storage.is_available() {
            return;
        }

        if value.is_null() {
            self.remove(key);
            return;
        }

        let serialized = value.to_string();
        match self.storage.set_item(key, &serialized) {
            Ok(()) => debug!("Saved {} to local storage ({} bytes)", key, serialized.len()),
            Err(e) => error!("Failed to save {} to local storage: {}", key, e),
        }
    }

    /// Serialize and store `value`; a value serializing to `null` (e.g. `None`) removes the entry
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => self.save_value(key, &v),
            Err(e) => error!("Failed to serialize {} for local storage: {}", key, e),
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            error!("Failed to remove {} from local storage: {}", key, e);
        }
    }

    /// A stored value that parses and matches the shape of `fallback`
    fn read(&self, key: &str, fallback: &Value) -> Option<Value> {
        if !self.storage.is_available() {
            return None;
        }

        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Failed to load {} from local storage: {}", key, e);
                return None;
            }
        };

        if ABSENT_SENTINELS.contains(&raw.trim()) {
            return None;
        }

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to load {} from local storage: {}", key, e);
                self.purge(key);
                return None;
            }
        };

        if parsed.is_null() {
            return None;
        }

        if !same_container(fallback, &parsed) {
            warn!(
                "Discarding {} from local storage: expected {}, found {}",
                key,
                container_name(fallback),
                container_name(&parsed)
            );
            self.purge(key);
            return None;
        }

        Some(parsed)
    }

    fn purge(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            error!("Failed to cleanup corrupted data for {}: {}", key, e);
        }
    }
}

/// Arrays only match arrays, objects only match objects; scalars accept anything
fn same_container(fallback: &Value, parsed: &Value) -> bool {
    match fallback {
        Value::Array(_) => parsed.is_array(),
        Value::Object(_) => parsed.is_object(),
        _ => true,
    }
}

fn container_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use crate::{Priority, TodoItem};
    use serde_json::json;

    fn cache() -> (LocalCache, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (LocalCache::new(storage.clone()), storage)
    }

    #[test]
    fn test_save_then_load() {
        let (cache, _) = cache();
        let value = json!({"a": [1, 2, {"b": null}], "c": "d"});

        cache.save_value("k", &value);
        assert_eq!(cache.load_value("k", json!({})), value);
        // Idempotent
        cache.save_value("k", &value);
        assert_eq!(cache.load_value("k", json!(null)), value);
    }

    #[test]
    fn test_absent_returns_fallback() {
        let (cache, storage) = cache();
        assert_eq!(cache.load_value("memoir_todos", json!([])), json!([]));

        for sentinel in ["", "undefined", "null"] {
            storage.set_item("k", sentinel).unwrap();
            assert_eq!(cache.load_value("k", json!([7])), json!([7]));
        }
    }

    #[test]
    fn test_null_removes_entry() {
        let (cache, storage) = cache();
        cache.save("k", &vec![1, 2]);
        assert!(storage.contains("k"));

        cache.save("k", &Option::<Vec<i32>>::None);
        assert!(!storage.contains("k"));
        assert_eq!(cache.load("k", vec![9]), vec![9]);
    }

    #[test]
    fn test_unparsable_entry_is_purged() {
        let (cache, storage) = cache();
        storage.set_item("memoir_moods", "[object Object]").unwrap();

        assert_eq!(cache.load_value("memoir_moods", json!({})), json!({}));
        assert!(!storage.contains("memoir_moods"));
    }

    #[test]
    fn test_shape_mismatch_is_purged() {
        let (cache, storage) = cache();
        storage.set_item("k", r#"{"not":"a list"}"#).unwrap();

        assert_eq!(cache.load_value("k", json!([])), json!([]));
        // A distinguishable fallback proves the entry is gone
        assert_eq!(cache.load_value("k", json!({"second": true})), json!({"second": true}));

        storage.set_item("k", "[1,2]").unwrap();
        assert_eq!(cache.load_value("k", json!({})), json!({}));
        assert!(!storage.contains("k"));
    }

    #[test]
    fn test_scalar_fallback_accepts_any_shape() {
        let (cache, _) = cache();
        cache.save_value("k", &json!([1]));
        assert_eq!(cache.load_value("k", json!(0)), json!([1]));
    }

    #[test]
    fn test_typed_schema_mismatch_is_purged() {
        let (cache, storage) = cache();
        storage.set_item("memoir_todos", r#"[{"unexpected":1}]"#).unwrap();

        let todos: Vec<TodoItem> = cache.load("memoir_todos", vec![]);
        assert!(todos.is_empty());
        assert!(!storage.contains("memoir_todos"));

        let items = vec![TodoItem::new("walk", "", Priority::Low)];
        cache.save("memoir_todos", &items);
        assert_eq!(cache.load("memoir_todos", Vec::<TodoItem>::new()), items);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let storage = Arc::new(MemoryStorage::with_quota(4));
        let cache = LocalCache::new(storage.clone());

        cache.save_value("k", &json!("far too long for the quota"));
        assert!(!storage.contains("k"));
        assert_eq!(cache.load_value("k", json!("fallback")), json!("fallback"));
    }

    #[test]
    fn test_disabled_cache() {
        let cache = LocalCache::disabled();
        assert!(!cache.is_enabled());
        cache.save_value("k", &json!([1, 2, 3]));
        assert_eq!(cache.load_value("k", json!([])), json!([]));
    }
}
