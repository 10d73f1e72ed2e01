//! Playlist operations

use super::SongsStore;
use memoir_types::Song;

impl SongsStore {
    pub async fn add(&self, song: Song) -> Song {
        self.update(|songs| songs.push(song.clone())).await;
        song
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.update(|songs| {
            let before = songs.len();
            songs.retain(|s| s.id != id);
            songs.len() != before
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::gateway;
    use super::*;

    #[tokio::test]
    async fn test_playlist_starts_from_defaults() {
        let store = SongsStore::new(gateway());
        let song = store
            .add(Song::new("First Dance", "Us", "https://example.com/a.mp3", 200))
            .await;

        assert_eq!(store.load().await.len(), 4);
        assert!(store.remove("1").await);
        assert!(store.remove(&song.id).await);
        assert!(!store.remove(&song.id).await);
        assert_eq!(store.load().await.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_playlist_is_kept() {
        let store = SongsStore::new(gateway());
        store.save(&vec![]).await;
        assert!(store.load().await.is_empty());
    }
}
