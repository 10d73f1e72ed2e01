//! Remote key-value store clients

pub mod handle;
pub mod memory;
pub mod upstash;

pub use handle::KvHandle;
pub use memory::MemoryKv;
pub use upstash::UpstashClient;

use crate::error::{MemoirError, Result};
use crate::ports::{KvStore, SetOptions};
use memoir_types::health_check_key;
use serde_json::Value;
use tracing::debug;

/// Expiry of the sentinel key written by [`round_trip_probe`]
pub const HEALTH_CHECK_TTL_SECS: u64 = 10;

const HEALTH_CHECK_VALUE: &str = "ok";

/// Write, read back and delete a short-lived sentinel key.
///
/// Succeeds only when the value read back equals the value written. The
/// delete is attempted even when the read fails.
pub async fn round_trip_probe(kv: &dyn KvStore) -> Result<()> {
    let key = health_check_key(chrono::Utc::now().timestamp_millis());
    let expected = Value::String(HEALTH_CHECK_VALUE.to_string());

    kv.set(&key, &expected, SetOptions::expire_in(HEALTH_CHECK_TTL_SECS))
        .await?;
    let read = kv.get(&key).await;
    let deleted = kv.del(&key).await;

    let read = read?;
    deleted?;

    debug!("Health check {} read back {:?}", key, read);
    if read.as_ref() == Some(&expected) {
        Ok(())
    } else {
        Err(MemoirError::HealthCheck("Redis test failed".to_string()))
    }
}
