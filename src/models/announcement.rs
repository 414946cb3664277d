// src/models/announcement.rs

//! Announcement record.

use serde::{Deserialize, Serialize};

use crate::watch::Tracked;

use super::id_string;

/// One announcement published on the portal notice board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Announcement {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub ann_id: String,

    /// Announcement title
    pub title: String,

    /// Announcement body
    #[serde(default)]
    pub content: String,

    /// Posting official or office
    #[serde(default)]
    pub posted_by: String,

    /// Publication timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Tracked for Announcement {
    type Key = String;

    const RESOURCE: &'static str = "announcements";

    fn key(&self) -> String {
        self.ann_id.clone()
    }

    // An announcement counts as updated when its visible text changes.
    fn changed_from(&self, previous: &Self) -> bool {
        self.title != previous.title || self.content != previous.content
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Announcement {
        Announcement {
            ann_id: "7".to_string(),
            title: "Water interruption".to_string(),
            content: "Zone 3, Tuesday 9am-3pm".to_string(),
            posted_by: "Admin Office".to_string(),
            created_at: "2026-03-01 09:00:00".to_string(),
        }
    }

    #[test]
    fn test_text_edit_counts_as_change() {
        let old = sample();
        let mut new = sample();
        assert!(!new.changed_from(&old));

        new.content = "Zone 3, Wednesday 9am-3pm".to_string();
        assert!(new.changed_from(&old));
    }

    #[test]
    fn test_deserialize_from_api_row() {
        let row: Announcement = serde_json::from_str(
            r#"{"ann_id": 7, "title": "Water interruption", "created_at": "2026-03-01 09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(row.ann_id, "7");
        assert_eq!(row.content, "");
    }
}
