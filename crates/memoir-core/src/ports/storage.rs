//! Local platform storage capability

use crate::Result;

/// Synchronous string key-value storage local to the running client
/// (browser `localStorage`, a cache directory, or nothing at all).
pub trait PlatformStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;

    /// False when this execution context has no local storage
    fn is_available(&self) -> bool {
        true
    }
}
