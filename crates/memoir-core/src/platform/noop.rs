//! Storage for execution contexts without local persistence

use crate::error::Result;
use crate::ports::PlatformStorage;

/// Reads find nothing, writes are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStorage;

impl PlatformStorage for NoopStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
