//! Photo wall view over memory images and standalone photos

use super::MemoryEntry;
use serde::{Deserialize, Serialize};

/// Where a photo on the wall comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhotoOrigin {
    Memory { memory_id: String, image_index: usize },
    Extra { extra_index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Data URI or URL
    pub src: String,
    pub origin: PhotoOrigin,
}

/// All non-blank photos: memory images first, then standalone photos
pub fn collect_photos(memories: &[MemoryEntry], extras: &[String]) -> Vec<PhotoRef> {
    let from_memories = memories.iter().flat_map(|m| {
        m.images
            .iter()
            .enumerate()
            .filter(|(_, src)| !src.trim().is_empty())
            .map(|(image_index, src)| PhotoRef {
                src: src.clone(),
                origin: PhotoOrigin::Memory {
                    memory_id: m.id.clone(),
                    image_index,
                },
            })
    });

    let from_extras = extras
        .iter()
        .enumerate()
        .filter(|(_, src)| !src.trim().is_empty())
        .map(|(extra_index, src)| PhotoRef {
            src: src.clone(),
            origin: PhotoOrigin::Extra { extra_index },
        });

    from_memories.chain(from_extras).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_sources() {
        let memory = MemoryEntry::new("2024-01-01", "t", "x", None)
            .with_images(vec!["a.png".into(), "  ".into(), "b.png".into()]);
        let extras = vec!["".to_string(), "c.png".to_string()];

        let photos = collect_photos(&[memory.clone()], &extras);
        let srcs: Vec<&str> = photos.iter().map(|p| p.src.as_str()).collect();
        assert_eq!(srcs, vec!["a.png", "b.png", "c.png"]);
        assert_eq!(
            photos[1].origin,
            PhotoOrigin::Memory {
                memory_id: memory.id,
                image_index: 2
            }
        );
        assert_eq!(photos[2].origin, PhotoOrigin::Extra { extra_index: 1 });
    }
}
