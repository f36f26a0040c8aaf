use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::incident::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Sos,
    Online,
    Offline,
}

/// Derived view of one family member. Never persisted; computed fresh on
/// every presence read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPresence {
    pub person_id: String,
    pub name: Option<String>,
    pub status: PresenceStatus,
    pub last_location: Option<Location>,
    pub last_seen_at: Option<DateTime<Utc>>,
}
