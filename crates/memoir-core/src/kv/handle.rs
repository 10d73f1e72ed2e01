//! Owned handle to the remote key-value store

use super::UpstashClient;
use crate::config::RemoteConfig;
use crate::error::{MemoirError, Result};
use crate::ports::KvStore;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

/// Owns the connection to the key-value store.
///
/// Built once at startup and passed to whoever needs it. The REST client is
/// constructed on first use and reused afterwards. Without configuration,
/// [`KvHandle::client`] yields `None` and callers treat the store as absent.
pub struct KvHandle {
    config: Option<RemoteConfig>,
    client: OnceCell<Arc<dyn KvStore>>,
}

impl KvHandle {
    pub fn new(config: Option<RemoteConfig>) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(RemoteConfig::from_env())
    }

    /// Wrap an already constructed store (in-process mock, tests)
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self {
            config: None,
            client: OnceCell::with_value(store),
        }
    }

    /// A handle that never yields a client
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn config(&self) -> Option<&RemoteConfig> {
        self.config.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.client.get().is_some() || self.config.is_some()
    }

    pub fn client(&self) -> Option<Arc<dyn KvStore>> {
        if let Some(client) = self.client.get() {
            return Some(client.clone());
        }

        let config = self.config.clone()?;
        let client = self.client.get_or_init(|| {
            info!("Connecting to key-value store at {}", config.url);
            let client: Arc<dyn KvStore> = Arc::new(UpstashClient::new(config));
            client
        });
        Some(client.clone())
    }

    /// Like [`KvHandle::client`], for callers that cannot proceed without a store
    pub fn require(&self) -> Result<Arc<dyn KvStore>> {
        self.client().ok_or(MemoirError::RemoteDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;

    #[test]
    fn test_disabled_handle_yields_nothing() {
        let handle = KvHandle::disabled();
        assert!(!handle.is_available());
        assert!(handle.client().is_none());
        assert!(matches!(handle.require(), Err(MemoirError::RemoteDisabled)));
    }

    #[test]
    fn test_client_is_memoized() {
        let config = RemoteConfig::from_parts(Some("https://kv.example".into()), Some("t".into()));
        let handle = KvHandle::new(config);

        let a = handle.client().unwrap();
        let b = handle.client().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_injected_store() {
        let handle = KvHandle::with_store(Arc::new(MemoryKv::new()));
        assert!(handle.is_available());
        assert!(handle.config().is_none());
        assert!(handle.client().is_some());
    }
}
