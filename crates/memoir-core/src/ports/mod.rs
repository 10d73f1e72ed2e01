//! Port traits (interfaces) for dependency injection

pub mod kv;
pub mod remote;
pub mod storage;

pub use kv::{KvStore, SetOptions};
pub use remote::RemoteTier;
pub use storage::PlatformStorage;
