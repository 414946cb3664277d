// src/models/directory.rs

//! Directory records: officials and emergency hotlines.
//!
//! Slow-moving collections compared to the rest of the portal; watched
//! all the same so directory edits propagate without a page reload.

use serde::{Deserialize, Serialize};

use crate::watch::Tracked;

use super::id_string;

/// An elected or appointed official listed in the portal directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Official {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub official_id: String,

    /// Full name
    pub name: String,

    /// Position or committee
    #[serde(default)]
    pub position: String,

    /// Office contact details
    #[serde(default)]
    pub contact: String,

    /// Listing timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Tracked for Official {
    type Key = String;

    const RESOURCE: &'static str = "officials";

    fn key(&self) -> String {
        self.official_id.clone()
    }

    fn changed_from(&self, previous: &Self) -> bool {
        self.name != previous.name
            || self.position != previous.position
            || self.contact != previous.contact
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}

/// An emergency hotline entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyHotline {
    /// Stable identifier
    #[serde(deserialize_with = "id_string")]
    pub hotline_id: String,

    /// Service name (fire, medical, police, ...)
    pub name: String,

    /// Phone number to dial
    #[serde(default)]
    pub number: String,

    /// Coverage or usage notes
    #[serde(default)]
    pub description: String,

    /// Listing timestamp
    #[serde(default)]
    pub created_at: String,
}

impl Tracked for EmergencyHotline {
    type Key = String;

    const RESOURCE: &'static str = "hotlines";

    fn key(&self) -> String {
        self.hotline_id.clone()
    }

    // A renumbered or renamed hotline must notify; description edits are
    // cosmetic.
    fn changed_from(&self, previous: &Self) -> bool {
        self.name != previous.name || self.number != previous.number
    }

    fn posted_at(&self) -> &str {
        &self.created_at
    }
}
