//! Persisted key identifiers
//!
//! The names are part of the storage contract: the same string is used for the
//! local cache entry and for the remote key-value entry.

/// Ordered list of memory entries
pub const MEMORIES_KEY: &str = "memoir_memories";
/// Mapping from ISO date to the pair of moods
pub const MOODS_KEY: &str = "memoir_moods";
/// Shared money ledger
pub const VAULT_KEY: &str = "memoir_vault";
/// Shared to-do list
pub const TODOS_KEY: &str = "memoir_todos";
/// Music playlist
pub const SONGS_KEY: &str = "memoir_songs";
/// Photos uploaded outside of a memory entry
pub const PHOTOS_KEY: &str = "memoir_photos";

/// Every key owned by a domain store
pub const KNOWN_KEYS: &[&str] = &[
    MEMORIES_KEY,
    MOODS_KEY,
    VAULT_KEY,
    TODOS_KEY,
    SONGS_KEY,
    PHOTOS_KEY,
];

/// Prefix of the short-lived sentinel key written by the health check
pub const HEALTH_CHECK_PREFIX: &str = "memoir_health_check_";

/// Reserved path segment of the health-check route
pub const HEALTH_CHECK_ROUTE: &str = "health-check";

/// Keys must be non-empty (whitespace-only keys are rejected as well)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Build a sentinel key unique to the given instant (milliseconds)
pub fn health_check_key(millis: i64) -> String {
    format!("{}{}", HEALTH_CHECK_PREFIX, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key(TODOS_KEY));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    fn test_known_keys_are_unique() {
        let mut keys = KNOWN_KEYS.to_vec();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), KNOWN_KEYS.len());
    }

    #[test]
    fn test_health_check_key() {
        assert_eq!(health_check_key(42), "memoir_health_check_42");
    }
}
