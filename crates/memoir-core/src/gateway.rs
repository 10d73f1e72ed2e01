//! Sync gateway
//!
//! The single persistence entry point for domain stores. Reads prefer the
//! remote tier and warm the local cache with whatever it returns; writes land
//! in the local cache first and are then pushed to the remote tier on a
//! best-effort basis. Neither `load` nor `save` ever fails from the caller's
//! point of view.

use crate::cache::LocalCache;
use crate::ports::RemoteTier;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

#[derive(Clone)]
pub struct SyncGateway {
    local: LocalCache,
    remote: Option<Arc<dyn RemoteTier>>,
}

impl SyncGateway {
    pub fn new(local: LocalCache, remote: Arc<dyn RemoteTier>) -> Self {
        Self {
            local,
            remote: Some(remote),
        }
    }

    /// Gateway without a remote tier; every read and write stays local
    pub fn local_only(local: LocalCache) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    pub fn local(&self) -> &LocalCache {
        &self.local
    }

    pub fn is_remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    /// Load `key`, preferring the remote tier.
    ///
    /// A usable remote value is written into the local cache and returned. If
    /// the remote fails, has nothing, or yields a value equal to `fallback`,
    /// the local cache decides (which returns `fallback` when it has nothing
    /// valid either).
    pub async fn load<T>(&self, key: &str, fallback: T) -> T
    where
        T: Serialize + DeserializeOwned + PartialEq,
    {
        if let Some(remote_value) = self.load_remote::<T>(key).await {
            if remote_value != fallback {
                return remote_value;
            }
            // Indistinguishable from "remote had nothing"; the cache was just
            // warmed with this same value so the outcome does not change.
            debug!("Remote value for {} equals the fallback, consulting local cache", key);
        }

        self.local.load(key, fallback)
    }

    /// Save `value` locally, then push it to the remote tier.
    ///
    /// A value serializing to `null` removes the key from both tiers. Remote
    /// failures are logged; the local write has already happened.
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(value) = self.save_local_value(key, value) else {
            return;
        };

        if let Some(remote) = &self.remote {
            push_remote(remote.as_ref(), key, &value).await;
        }
    }

    /// Like [`SyncGateway::save`] but the remote write runs in a spawned task.
    ///
    /// Overlapping detached writes to the same key are not ordered: the remote
    /// ends up with whichever request completes last.
    pub fn save_detached<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Option<JoinHandle<()>> {
        let value = self.save_local_value(key, value)?;
        let remote = self.remote.clone()?;
        let key = key.to_string();

        Some(tokio::spawn(async move {
            push_remote(remote.as_ref(), &key, &value).await;
        }))
    }

    /// Remove `key` from both tiers
    pub async fn remove(&self, key: &str) {
        self.save(key, &Value::Null).await;
    }

    /// Synchronous, local-only read
    pub fn load_local<T>(&self, key: &str, fallback: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.local.load(key, fallback)
    }

    /// Synchronous, local-only write
    pub fn save_local<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        self.local.save(key, value);
    }

    /// Round-trip health probe against the remote tier. For status display only.
    pub async fn is_available(&self) -> bool {
        let Some(remote) = &self.remote else {
            return false;
        };

        match remote.health().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }

    async fn load_remote<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let remote = self.remote.as_ref()?;

        let value = match remote.fetch(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("Server storage has no data for {}", key);
                return None;
            }
            Err(e) => {
                warn!("Server storage unavailable for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_value::<T>(value.clone()) {
            Ok(parsed) => {
                self.local.save_value(key, &value);
                Some(parsed)
            }
            Err(e) => {
                warn!("Server storage returned unusable data for {}: {}", key, e);
                None
            }
        }
    }

    fn save_local_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Option<Value> {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.local.save_value(key, &value);
                Some(value)
            }
            Err(e) => {
                error!("Failed to serialize {}: {}", key, e);
                None
            }
        }
    }
}

async fn push_remote(remote: &dyn RemoteTier, key: &str, value: &Value) {
    let result = if value.is_null() {
        remote.remove(key).await
    } else {
        remote.store(key, value).await
    };

    match result {
        Ok(()) => debug!("Synced {} to server storage", key),
        Err(e) => warn!("Server save failed for {}, data only stored locally: {}", key, e),
    }
}
