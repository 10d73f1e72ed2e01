//! Memory timeline operations

use super::MemoriesStore;
use memoir_types::{order_memories, toggle_pin, Comment, Identity, MemoryEntry};

impl MemoriesStore {
    /// Newest entries are stored first
    pub async fn add(&self, entry: MemoryEntry) -> MemoryEntry {
        self.update(|memories| {
            memories.insert(0, entry.clone());
        })
        .await;
        entry
    }

    /// Apply `f` to the entry with `id`; false when there is no such entry
    pub async fn edit<F>(&self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut MemoryEntry),
    {
        self.update(|memories| match memories.iter_mut().find(|m| m.id == id) {
            Some(memory) => {
                f(memory);
                true
            }
            None => false,
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.update(|memories| {
            let before = memories.len();
            memories.retain(|m| m.id != id);
            memories.len() != before
        })
        .await
    }

    /// At most one entry is pinned at a time
    pub async fn toggle_pin(&self, id: &str) -> bool {
        self.update(|memories| toggle_pin(memories, id)).await
    }

    pub async fn add_comment(
        &self,
        memory_id: &str,
        identity: Identity,
        text: &str,
    ) -> Option<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let comment = Comment::new(identity, text);
        let added = self
            .edit(memory_id, |memory| memory.comments.push(comment.clone()))
            .await;
        added.then_some(comment)
    }

    pub async fn delete_comment(&self, memory_id: &str, comment_id: &str) -> bool {
        let mut removed = false;
        self.edit(memory_id, |memory| {
            let before = memory.comments.len();
            memory.comments.retain(|c| c.id != comment_id);
            removed = memory.comments.len() != before;
        })
        .await;
        removed
    }

    /// Timeline order: pinned first, then newest
    pub async fn ordered(&self) -> Vec<MemoryEntry> {
        order_memories(&self.load().await)
    }
}
