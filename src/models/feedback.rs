// src/models/feedback.rs

//! Resident feedback record.

use serde::{Deserialize, Serialize};

use crate::watch::Tracked;

use super::id_string;

/// Feedback or a complaint submitted through the portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub feedback_id: String,

    /// Short subject line
    #[serde(default)]
    pub subject: String,

    /// Feedback body
    #[serde(default)]
    pub message: String,

    /// Handling status (unread, in review, addressed, ...)
    #[serde(default)]
    pub status: String,

    /// Submission timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Tracked for Feedback {
    type Key = String;

    const RESOURCE: &'static str = "feedback";

    fn key(&self) -> String {
        self.feedback_id.clone()
    }

    fn changed_from(&self, previous: &Self) -> bool {
        self.status != previous.status
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}
