//! Memoir Types - Pure type definitions shared by every tier
//!
//! This crate contains only plain data types with no async runtime dependencies,
//! so it can be used by the storage core, the HTTP boundary and any future
//! browser front end alike.

pub mod keys;
pub mod memory;
pub mod mood;
pub mod photo;
pub mod song;
pub mod storage;
pub mod todo;
pub mod vault;

pub use keys::*;
pub use memory::*;
pub use mood::*;
pub use photo::*;
pub use song::*;
pub use storage::*;
pub use todo::*;
pub use vault::*;

use serde::{Deserialize, Serialize};

/// The two people sharing the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    Daddy,
    Puppy,
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Daddy => write!(f, "daddy"),
            Identity::Puppy => write!(f, "puppy"),
        }
    }
}

/// Generate a fresh identifier for a persisted entry
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
