//! Mood calendar operations

use super::MoodsStore;
use chrono::NaiveDate;
use memoir_types::{DualMood, Identity, MoodKey};

/// Calendar dates are keyed as `yyyy-MM-dd`
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl MoodsStore {
    /// Record `identity`'s mood for `date`, keeping the other person's entry
    pub async fn set_mood(&self, date: NaiveDate, identity: Identity, mood: MoodKey) -> DualMood {
        self.update(|moods| {
            let entry = moods.entry(date_key(date)).or_default();
            entry.set(identity, mood);
            entry.clone()
        })
        .await
    }

    pub async fn mood_for(&self, date: NaiveDate) -> Option<DualMood> {
        self.load().await.remove(&date_key(date))
    }
}
