use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use super::incident::{decode_err, Location};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub join_code: String,
    pub admin_id: String,
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Family {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        Ok(Family {
            id: id.parse().map_err(|e| decode_err("id", e))?,
            name: row.try_get("name")?,
            join_code: row.try_get("join_code")?,
            admin_id: row.try_get("admin_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A group member as seen in the family room: identity plus the last
/// position report, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub person_id: String,
    pub name: Option<String>,
    pub last_location: Option<Location>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl FromRow<'_, SqliteRow> for FamilyMember {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let lat: Option<f64> = row.try_get("last_lat")?;
        let lng: Option<f64> = row.try_get("last_lng")?;
        Ok(FamilyMember {
            person_id: row.try_get("person_id")?,
            name: row.try_get("name")?,
            last_location: match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Location { lat, lng }),
                _ => None,
            },
            last_seen_at: row.try_get("last_seen_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetail {
    #[serde(flatten)]
    pub family: Family,
    pub members: Vec<FamilyMember>,
}
