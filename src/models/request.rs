// src/models/request.rs

//! Resident service request record.

use serde::{Deserialize, Serialize};

use crate::watch::Tracked;

use super::id_string;

/// A service/assistance request filed by a resident.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub comreq_id: String,

    /// Requested service category
    #[serde(default)]
    pub request_type: String,

    /// Free-form request details
    #[serde(default)]
    pub details: String,

    /// Processing status (pending, approved, released, ...)
    #[serde(default)]
    pub status: String,

    /// Submission timestamp
    #[serde(default)]
    pub created_at: String,

    /// Last modification timestamp; not sent by every backend version
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Tracked for ServiceRequest {
    type Key = String;

    const RESOURCE: &'static str = "requests";

    fn key(&self) -> String {
        self.comreq_id.clone()
    }

    // Status drives the notification. `updated_at` only participates when
    // both sides carry it; a missing value is never a change by itself.
    fn changed_from(&self, previous: &Self) -> bool {
        if self.status != previous.status {
            return true;
        }
        match (&self.updated_at, &previous.updated_at) {
            (Some(current), Some(prior)) => current != prior,
            _ => false,
        }
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: &str, updated_at: Option<&str>) -> ServiceRequest {
        ServiceRequest {
            comreq_id: "15".to_string(),
            request_type: "Certificate of Residency".to_string(),
            details: "For employment".to_string(),
            status: status.to_string(),
            created_at: "2026-02-10 14:30:00".to_string(),
            updated_at: updated_at.map(String::from),
        }
    }

    #[test]
    fn test_status_change_is_an_update() {
        let old = sample("pending", None);
        let new = sample("approved", None);
        assert!(new.changed_from(&old));
    }

    #[test]
    fn test_missing_updated_at_is_not_a_change() {
        let old = sample("pending", Some("2026-02-10 14:30:00"));
        let new = sample("pending", None);
        assert!(!new.changed_from(&old));
        assert!(!old.changed_from(&new));
    }

    #[test]
    fn test_updated_at_change_is_an_update() {
        let old = sample("pending", Some("2026-02-10 14:30:00"));
        let new = sample("pending", Some("2026-02-11 08:00:00"));
        assert!(new.changed_from(&old));
    }
}
