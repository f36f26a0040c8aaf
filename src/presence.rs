use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use crate::models::presence::PresenceStatus;

/// How recent a position report must be for a member to count as online.
pub const ONLINE_WINDOW_SECS: i64 = 120;

/// Derives the display status of one tracked person.
///
/// The match order is load-bearing: an active SOS always wins, even over a
/// fresh last-seen timestamp, so a reporter in distress can never be shown
/// as merely online or offline. The viewer is always online to themself,
/// which avoids self-flicker from clock skew between client and server.
pub fn resolve_status(
    person_id: &str,
    last_seen_at: Option<DateTime<Utc>>,
    viewer_id: &str,
    active_reporters: &HashSet<String>,
    now: DateTime<Utc>,
) -> PresenceStatus {
    if active_reporters.contains(person_id) {
        return PresenceStatus::Sos;
    }

    if person_id == viewer_id {
        return PresenceStatus::Online;
    }

    if let Some(seen) = last_seen_at {
        if now - seen < Duration::seconds(ONLINE_WINDOW_SECS) {
            return PresenceStatus::Online;
        }
    }

    PresenceStatus::Offline
}
