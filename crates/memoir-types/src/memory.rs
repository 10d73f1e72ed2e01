//! Memory timeline entries

use super::Identity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A comment left on a memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub identity: Identity,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Comment {
    pub fn new(identity: Identity, text: impl Into<String>) -> Self {
        Self {
            id: crate::generate_id(),
            identity,
            text: text.into(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// One entry of the shared timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    pub id: String,
    /// ISO date (`yyyy-MM-dd`) or full ISO timestamp
    pub date: String,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl MemoryEntry {
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        identity: Option<Identity>,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            date: date.into(),
            title: title.into(),
            text: text.into(),
            images: Vec::new(),
            created_at: Utc::now().timestamp_millis(),
            pinned: false,
            identity,
            comments: Vec::new(),
        }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Timestamp used for ordering; unparsable dates count as "now"
    pub fn sort_timestamp(&self) -> i64 {
        parse_date_millis(&self.date).unwrap_or_else(|| Utc::now().timestamp_millis())
    }
}

/// Parse an ISO date or timestamp into epoch milliseconds
pub fn parse_date_millis(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Timeline order: pinned entries first, then newest date, then newest creation.
/// Entries without an id or date are dropped.
pub fn order_memories(memories: &[MemoryEntry]) -> Vec<MemoryEntry> {
    let mut ordered: Vec<MemoryEntry> = memories
        .iter()
        .filter(|m| !m.id.is_empty() && !m.date.is_empty())
        .cloned()
        .collect();

    ordered.sort_by(|a, b| match (a.pinned, b.pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let (ta, tb) = (a.sort_timestamp(), b.sort_timestamp());
            if ta == tb {
                b.created_at.cmp(&a.created_at)
            } else {
                tb.cmp(&ta)
            }
        }
    });

    ordered
}

/// Toggle the pin of one entry. Pinning an entry unpins every other one.
/// Returns false when no entry has the given id.
pub fn toggle_pin(memories: &mut [MemoryEntry], id: &str) -> bool {
    let Some(target_pinned) = memories.iter().find(|m| m.id == id).map(|m| m.pinned) else {
        return false;
    };

    for memory in memories.iter_mut() {
        if memory.id == id {
            memory.pinned = !target_pinned;
        } else if !target_pinned {
            memory.pinned = false;
        }
    }
    true
}
