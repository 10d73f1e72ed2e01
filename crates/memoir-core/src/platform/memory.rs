//! In-memory platform storage using DashMap

use crate::error::{MemoirError, Result};
use crate::ports::PlatformStorage;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-local storage with an optional byte quota
pub struct MemoryStorage {
    data: DashMap<String, String>,
    quota: Option<usize>,
    used: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            quota: None,
            used: AtomicUsize::new(0),
        }
    }

    /// Reject writes that would push the total stored bytes past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Total bytes of all stored values
    pub fn used_bytes(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    /// Swap `previous` bytes for `next` bytes, failing if the quota would be exceeded
    fn reserve(&self, key: &str, previous: usize, next: usize) -> Result<()> {
        self.used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                let total = used.saturating_sub(previous) + next;
                match self.quota {
                    Some(quota) if total > quota => None,
                    _ => Some(total),
                }
            })
            .map(|_| ())
            .map_err(|_| MemoirError::QuotaExceeded {
                key: key.to_string(),
            })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        // The entry lock keeps a concurrent remove of this key out until the
        // byte count is settled
        match self.data.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                self.reserve(key, occupied.get().len(), value.len())?;
                occupied.insert(value.to_string());
            }
            Entry::Vacant(vacant) => {
                self.reserve(key, 0, value.len())?;
                vacant.insert(value.to_string());
            }
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if let Some((_, old)) = self.data.remove(key) {
            self.used.fetch_sub(old.len(), Ordering::SeqCst);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let storage = MemoryStorage::new();

        storage.set_item("key1", "[1,2,3]").unwrap();
        assert_eq!(storage.get_item("key1").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(storage.get_item("nonexistent").unwrap(), None);

        storage.remove_item("key1").unwrap();
        assert_eq!(storage.get_item("key1").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota() {
        let storage = MemoryStorage::with_quota(8);

        storage.set_item("a", "12345").unwrap();
        let err = storage.set_item("b", "12345").unwrap_err();
        assert!(matches!(err, MemoirError::QuotaExceeded { .. }));

        // Overwriting reuses the space of the previous value
        storage.set_item("a", "12345678").unwrap();
        storage.remove_item("a").unwrap();
        storage.set_item("b", "12345").unwrap();
        assert_eq!(storage.used_bytes(), 5);
    }

    #[test]
    fn test_concurrent_set_and_remove_keep_byte_count() {
        let storage = std::sync::Arc::new(MemoryStorage::with_quota(1 << 20));

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let storage = storage.clone();
                std::thread::spawn(move || {
                    let own = format!("key{}", i);
                    for n in 0..500 {
                        let value = "x".repeat(n % 17 + 1);
                        storage.set_item("shared", &value).unwrap();
                        storage.remove_item("shared").unwrap();
                        storage.set_item(&own, &value).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let stored: usize = storage.data.iter().map(|e| e.value().len()).sum();
        assert_eq!(storage.used_bytes(), stored);
    }
}
