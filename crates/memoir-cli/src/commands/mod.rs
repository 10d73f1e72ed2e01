//! Command implementations

pub mod status;
pub mod storage;

use memoir_core::{
    FileStorage, KvHandle, KvRemote, KvStore, LocalCache, StorageApiClient, SyncGateway,
};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Where writes go after the local cache
pub enum Remote {
    /// A memoir server; the URL is its root, `/api` is appended
    Server(String),
    /// The key-value store itself, without a server in between
    Kv { url: String, store: Arc<dyn KvStore> },
    Disabled,
}

impl Remote {
    /// `--local-only` wins, then an explicit or configured server, then KV credentials
    pub fn select(server_url: Option<&str>, kv: &KvHandle, local_only: bool) -> Self {
        if local_only {
            return Remote::Disabled;
        }

        if let Some(url) = server_url.map(str::trim).filter(|u| !u.is_empty()) {
            return Remote::Server(url.trim_end_matches('/').to_string());
        }

        match kv.client() {
            Some(store) => Remote::Kv {
                url: kv
                    .config()
                    .map(|c| c.url.clone())
                    .unwrap_or_else(|| "in-process".to_string()),
                store,
            },
            None => Remote::Disabled,
        }
    }

    pub fn gateway(&self, cache_dir: &Path) -> SyncGateway {
        debug!("Local cache at {}", cache_dir.display());
        let local = LocalCache::new(Arc::new(FileStorage::new(cache_dir)));

        match self {
            Remote::Server(url) => SyncGateway::new(
                local,
                Arc::new(StorageApiClient::new(format!("{}/api", url))),
            ),
            Remote::Kv { store, .. } => {
                SyncGateway::new(local, Arc::new(KvRemote::new(store.clone())))
            }
            Remote::Disabled => SyncGateway::local_only(local),
        }
    }
}

impl fmt::Display for Remote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remote::Server(url) => write!(f, "server {}", url),
            Remote::Kv { url, .. } => write!(f, "key-value store {}", url),
            Remote::Disabled => write!(f, "none (local only)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoir_core::MemoryKv;

    #[test]
    fn test_local_only_wins() {
        let kv = KvHandle::with_store(Arc::new(MemoryKv::new()));
        let remote = Remote::select(Some("http://localhost:3000"), &kv, true);
        assert!(matches!(remote, Remote::Disabled));
    }

    #[test]
    fn test_server_preferred_over_kv() {
        let kv = KvHandle::with_store(Arc::new(MemoryKv::new()));
        let remote = Remote::select(Some("http://localhost:3000/"), &kv, false);
        match remote {
            Remote::Server(url) => assert_eq!(url, "http://localhost:3000"),
            _ => panic!("expected server remote"),
        }
    }

    #[test]
    fn test_kv_fallback_and_disabled() {
        let kv = KvHandle::with_store(Arc::new(MemoryKv::new()));
        assert!(matches!(Remote::select(Some("  "), &kv, false), Remote::Kv { .. }));

        let none = Remote::select(None, &KvHandle::disabled(), false);
        assert!(matches!(none, Remote::Disabled));
        assert_eq!(none.to_string(), "none (local only)");
    }

    #[test]
    fn test_gateway_wiring() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvHandle::with_store(Arc::new(MemoryKv::new()));

        assert!(Remote::select(None, &kv, false)
            .gateway(dir.path())
            .is_remote_configured());
        assert!(!Remote::Disabled.gateway(dir.path()).is_remote_configured());
    }
}
