// src/models/faq.rs

//! FAQ record.

use serde::{Deserialize, Serialize};

use crate::watch::Tracked;

use super::id_string;

/// One frequently-asked question with its published answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faq {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub faq_id: String,

    /// The question text
    pub question: String,

    /// The published answer
    #[serde(default)]
    pub answer: String,

    /// Publication timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Tracked for Faq {
    type Key = String;

    const RESOURCE: &'static str = "faqs";

    fn key(&self) -> String {
        self.faq_id.clone()
    }

    fn changed_from(&self, previous: &Self) -> bool {
        self.question != previous.question || self.answer != previous.answer
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_edit_is_an_update() {
        let old = Faq {
            faq_id: "1".to_string(),
            question: "How do I request a permit?".to_string(),
            answer: "Visit the office.".to_string(),
            created_at: "2026-01-05 08:00:00".to_string(),
        };

        let mut new = old.clone();
        assert!(!new.changed_from(&old));

        new.answer = "Submit the request form online.".to_string();
        assert!(new.changed_from(&old));
    }
}
