use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Medical,
    Fire,
    Police,
    Accident,
    Violence,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Medical => "medical",
            Category::Fire => "fire",
            Category::Police => "police",
            Category::Accident => "accident",
            Category::Violence => "violence",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "medical" => Ok(Category::Medical),
            "fire" => Ok(Category::Fire),
            "police" => Ok(Category::Police),
            "accident" => Ok(Category::Accident),
            "violence" => Ok(Category::Violence),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Active,
    Resolved,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Active => "active",
            IncidentStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown incident status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for IncidentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(IncidentStatus::Active),
            "resolved" => Ok(IncidentStatus::Resolved),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VulnerablePersons {
    #[serde(default)]
    pub infants: bool,
    #[serde(default)]
    pub elderly: bool,
}

/// A single SOS record. `location`, `priority` and `created_at` are fixed at
/// creation; `status` moves from active to resolved exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: Uuid,
    pub reporter_id: String,
    pub reporter_name: String,
    pub location: Location,
    pub category: Category,
    pub priority: Priority,
    pub details: String,
    pub vulnerable_persons: VulnerablePersons,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl FromRow<'_, SqliteRow> for Incident {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let category: String = row.try_get("category")?;
        let priority: String = row.try_get("priority")?;
        let status: String = row.try_get("status")?;

        Ok(Incident {
            id: id.parse().map_err(|e| decode_err("id", e))?,
            reporter_id: row.try_get("reporter_id")?,
            reporter_name: row.try_get("reporter_name")?,
            location: Location {
                lat: row.try_get("lat")?,
                lng: row.try_get("lng")?,
            },
            category: category.parse().map_err(|e| decode_err("category", e))?,
            priority: priority.parse().map_err(|e| decode_err("priority", e))?,
            details: row.try_get("details")?,
            vulnerable_persons: VulnerablePersons {
                infants: row.try_get("has_infants")?,
                elderly: row.try_get("has_elderly")?,
            },
            status: status.parse().map_err(|e| decode_err("status", e))?,
            created_at: row.try_get("created_at")?,
            resolved_at: row.try_get("resolved_at")?,
        })
    }
}

pub(crate) fn decode_err(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}
