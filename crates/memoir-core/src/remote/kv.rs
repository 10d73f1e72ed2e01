//! Remote tier that talks to a key-value store directly

use crate::error::Result;
use crate::kv::round_trip_probe;
use crate::ports::{KvStore, RemoteTier, SetOptions};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Skips the HTTP boundary and drives a [`KvStore`] in-process
pub struct KvRemote {
    kv: Arc<dyn KvStore>,
}

impl KvRemote {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl RemoteTier for KvRemote {
    async fn fetch(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.kv.get(key).await?.filter(|v| !v.is_null()))
    }

    async fn store(&self, key: &str, value: &Value) -> Result<()> {
        self.kv.set(key, value, SetOptions::default()).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.kv.del(key).await
    }

    async fn health(&self) -> Result<()> {
        round_trip_probe(self.kv.as_ref()).await
    }
}
