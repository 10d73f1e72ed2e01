//! Remote tier implementations for the sync gateway

pub mod api;
pub mod kv;

pub use api::StorageApiClient;
pub use kv::KvRemote;
