//! Daily moods, one per person

use super::Identity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKey {
    Great,
    Good,
    Ok,
    Down,
    Bad,
}

/// The pair of moods recorded for a single day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualMood {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daddy: Option<MoodKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy: Option<MoodKey>,
}

impl DualMood {
    pub fn get(&self, identity: Identity) -> Option<MoodKey> {
        match identity {
            Identity::Daddy => self.daddy,
            Identity::Puppy => self.puppy,
        }
    }

    pub fn set(&mut self, identity: Identity, mood: MoodKey) {
        match identity {
            Identity::Daddy => self.daddy = Some(mood),
            Identity::Puppy => self.puppy = Some(mood),
        }
    }
}

/// ISO date (`yyyy-MM-dd`) -> moods of that day
pub type MoodMap = BTreeMap<String, DualMood>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_other_side() {
        let mut mood = DualMood::default();
        mood.set(Identity::Daddy, MoodKey::Great);
        mood.set(Identity::Puppy, MoodKey::Down);
        mood.set(Identity::Daddy, MoodKey::Ok);

        assert_eq!(mood.get(Identity::Daddy), Some(MoodKey::Ok));
        assert_eq!(mood.get(Identity::Puppy), Some(MoodKey::Down));
    }

    #[test]
    fn test_wire_format_omits_missing_side() {
        let mut map = MoodMap::new();
        map.insert(
            "2024-02-14".into(),
            DualMood {
                daddy: Some(MoodKey::Great),
                puppy: None,
            },
        );
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-02-14":{"daddy":"great"}}"#);
    }
}
