//! Photo wall operations

use super::{Collection, Memories, PhotosStore};
use memoir_types::{collect_photos, MemoryEntry, PhotoOrigin, PhotoRef};

impl PhotosStore {
    /// Blank sources are rejected
    pub async fn add(&self, src: &str) -> bool {
        let src = src.trim();
        if src.is_empty() {
            return false;
        }
        self.update(|photos| photos.push(src.to_string())).await;
        true
    }

    /// Every photo on the wall: images attached to memories, then standalone photos
    pub async fn all_photos(&self) -> Vec<PhotoRef> {
        let memories: Vec<MemoryEntry> = self
            .gateway()
            .load(Memories::KEY, Memories::fallback())
            .await;
        let extras = self.load().await;
        collect_photos(&memories, &extras)
    }

    /// Delete a photo wherever it lives; the source must still match
    pub async fn delete(&self, photo: &PhotoRef) -> bool {
        match &photo.origin {
            PhotoOrigin::Extra { extra_index } => {
                self.update(|photos| remove_matching(photos, *extra_index, &photo.src))
                    .await
            }
            PhotoOrigin::Memory {
                memory_id,
                image_index,
            } => {
                let gateway = self.gateway();
                let mut memories: Vec<MemoryEntry> =
                    gateway.load(Memories::KEY, Memories::fallback()).await;
                let removed = memories
                    .iter_mut()
                    .find(|m| &m.id == memory_id)
                    .map(|m| remove_matching(&mut m.images, *image_index, &photo.src))
                    .unwrap_or(false);
                if removed {
                    gateway.save(Memories::KEY, &memories).await;
                }
                removed
            }
        }
    }
}

fn remove_matching(list: &mut Vec<String>, index: usize, src: &str) -> bool {
    if list.get(index).map(String::as_str) == Some(src) {
        list.remove(index);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::gateway;
    use super::super::MemoriesStore;
    use super::*;

    #[tokio::test]
    async fn test_wall_merges_both_sources() {
        let gateway = gateway();
        let photos = PhotosStore::new(gateway.clone());
        let memories = MemoriesStore::new(gateway);

        memories
            .add(MemoryEntry::new("2024-01-01", "beach", "", None).with_images(vec!["beach.jpg".into()]))
            .await;
        assert!(photos.add("data:image/png;base64,AAAA").await);
        assert!(!photos.add("   ").await);

        let wall = photos.all_photos().await;
        assert_eq!(wall.len(), 2);
        assert_eq!(wall[0].src, "beach.jpg");

        assert!(photos.delete(&wall[0]).await);
        assert!(photos.delete(&wall[1]).await);
        assert!(!photos.delete(&wall[1]).await);
        assert!(photos.all_photos().await.is_empty());
        assert_eq!(memories.load().await.len(), 1);
    }
}
