//! Browser `window.localStorage`

use crate::error::{MemoirError, Result};
use crate::ports::PlatformStorage;

/// Resolves the storage object on every call; outside a browser every call
/// behaves like [`super::NoopStorage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl PlatformStorage for WebStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match Self::storage() {
            Some(storage) => storage
                .get_item(key)
                .map_err(|e| MemoirError::Storage(format!("{:?}", e))),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        match Self::storage() {
            Some(storage) => storage
                .set_item(key, value)
                .map_err(|_| MemoirError::QuotaExceeded {
                    key: key.to_string(),
                }),
            None => Ok(()),
        }
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match Self::storage() {
            Some(storage) => storage
                .remove_item(key)
                .map_err(|e| MemoirError::Storage(format!("{:?}", e))),
            None => Ok(()),
        }
    }

    fn is_available(&self) -> bool {
        Self::storage().is_some()
    }
}
