//! Playlist entries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub url: String,
    /// Length in seconds
    #[serde(default)]
    pub duration: u32,
}

impl Song {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
        duration: u32,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            title: title.into(),
            artist: artist.into(),
            url: url.into(),
            duration,
        }
    }
}

/// Playlist shown before anything has been saved
pub fn default_songs() -> Vec<Song> {
    let placeholder = |id: &str, title: &str, artist: &str, duration: u32| Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        url: "/placeholder-audio.mp3".to_string(),
        duration,
    };

    vec![
        placeholder("1", "Our Song", "Memory Lane", 180),
        placeholder("2", "Together Forever", "Love Notes", 210),
        placeholder("3", "Sweet Dreams", "Gentle Waves", 195),
    ]
}
