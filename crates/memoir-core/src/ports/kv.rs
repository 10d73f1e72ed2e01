//! Remote key-value store

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Options for [`KvStore::set`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Expiry in seconds
    pub expiry_secs: Option<u64>,
}

impl SetOptions {
    pub fn expire_in(secs: u64) -> Self {
        Self {
            expiry_secs: Some(secs),
        }
    }
}

/// Hosted key-value database holding JSON values
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: &Value, options: SetOptions) -> Result<()>;
    async fn del(&self, key: &str) -> Result<()>;
}
