//! Error types for the persistence core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoirError>;

#[derive(Error, Debug)]
pub enum MemoirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded for {key}")]
    QuotaExceeded { key: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Remote store not configured")]
    RemoteDisabled,

    #[error("Health check failed: {0}")]
    HealthCheck(String),

    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for MemoirError {
    fn from(e: serde_json::Error) -> Self {
        MemoirError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for MemoirError {
    fn from(e: reqwest::Error) -> Self {
        MemoirError::Http(e.to_string())
    }
}
