// src/models/mod.rs

//! Domain models for the portal resources.
//!
//! One record type per watched collection. Identity keys are carried as
//! strings and treated as opaque, since the backend serializes row IDs
//! inconsistently (numeric or quoted depending on the deploy).

mod announcement;
mod directory;
mod faq;
mod feedback;
mod request;

pub use announcement::Announcement;
pub use directory::{EmergencyHotline, Official};
pub use faq::Faq;
pub use feedback::Feedback;
pub use request::ServiceRequest;

use serde::{Deserialize, Deserializer};

/// Accept a record ID whether the backend sends it as a number or a
/// string.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_string")]
        id: String,
    }

    #[test]
    fn test_id_string_accepts_both_encodings() {
        let quoted: Row = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(quoted.id, "42");

        let numeric: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(numeric.id, "42");
    }
}
