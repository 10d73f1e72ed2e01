//! In-process key-value store using DashMap
//!
//! Stands in for the hosted store when no remote is configured (mock
//! deployment mode) and in tests.

use crate::error::Result;
use crate::ports::{KvStore, SetOptions};
use async_trait::async_trait;
use dashmap::DashMap;
use memoir_types::{VaultData, MEMORIES_KEY, MOODS_KEY, PHOTOS_KEY, SONGS_KEY, TODOS_KEY, VAULT_KEY};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Key-value map with TTL support
#[derive(Clone, Default)]
pub struct MemoryKv {
    data: Arc<DashMap<String, KvEntry>>,
}

struct KvEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl KvEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map(|expires| now > expires).unwrap_or(false)
    }
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with an empty collection for every domain key
    pub fn seeded() -> Self {
        let kv = Self::new();
        for key in [MEMORIES_KEY, TODOS_KEY, SONGS_KEY, PHOTOS_KEY] {
            kv.insert(key, json!([]), None);
        }
        kv.insert(MOODS_KEY, json!({}), None);
        kv.insert(
            VAULT_KEY,
            serde_json::to_value(VaultData::default()).unwrap_or_else(|_| json!({})),
            None,
        );
        kv
    }

    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.data.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, key: &str, value: Value, ttl: Option<Duration>) {
        self.data.insert(
            key.to_string(),
            KvEntry {
                value,
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let entry = self.data.get(key)?;
        if entry.is_expired(Instant::now()) {
            drop(entry);
            self.data.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Periodically drop expired entries
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let data = self.data.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;

                let now = Instant::now();
                data.retain(|_, entry| !entry.is_expired(now));
            }
        })
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lookup(key))
    }

    async fn set(&self, key: &str, value: &Value, options: SetOptions) -> Result<()> {
        self.insert(
            key,
            value.clone(),
            options.expiry_secs.map(Duration::from_secs),
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}
