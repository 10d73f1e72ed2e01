//! Remote tier as seen by the sync gateway

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait RemoteTier: Send + Sync {
    /// `Ok(None)` when the remote has no value for `key`
    async fn fetch(&self, key: &str) -> Result<Option<Value>>;
    async fn store(&self, key: &str, value: &Value) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
    /// `Ok(())` only when a full round trip against the store succeeded
    async fn health(&self) -> Result<()>;
}
