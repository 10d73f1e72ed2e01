//! Memoir Core Library
//!
//! Two-tier persistence for the journal: a local cache that survives offline
//! use, a remote key-value store, and the gateway that keeps them in step.

// Re-export pure types from memoir-types
pub use memoir_types::*;

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod kv;
pub mod platform;
pub mod ports;
pub mod probe;
pub mod remote;
pub mod stores;

pub use cache::LocalCache;
pub use config::RemoteConfig;
pub use error::{MemoirError, Result};
pub use gateway::SyncGateway;
pub use kv::{KvHandle, MemoryKv, UpstashClient};
pub use platform::{FileStorage, MemoryStorage, NoopStorage};
pub use ports::{KvStore, PlatformStorage, RemoteTier, SetOptions};
pub use probe::{AvailabilityProbe, ProbeHandle, ServerStatus, StorageBadge};
pub use remote::{KvRemote, StorageApiClient};
