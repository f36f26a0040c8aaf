use chrono::Utc;
use sqlx::Row;
use std::collections::HashSet;
use uuid::Uuid;

use crate::db::{queries, DbPool};
use crate::error::AppError;
use crate::models::incident::Location;
use crate::models::presence::MemberPresence;
use crate::presence::resolve_status;
use crate::store::families;

/// Records a position report for a person, implicitly refreshing their
/// last-seen timestamp.
pub async fn report_location(
    pool: &DbPool,
    person_id: &str,
    person_name: Option<&str>,
    location: Location,
) -> Result<(), AppError> {
    if person_id.is_empty() {
        return Err(AppError::Validation("personId is required".to_string()));
    }
    if !location.is_finite() {
        return Err(AppError::Validation(
            "location must contain finite lat/lng".to_string(),
        ));
    }

    sqlx::query(queries::UPSERT_PERSON_LOCATION)
        .bind(person_id)
        .bind(person_name)
        .bind(location.lat)
        .bind(location.lng)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(())
}

/// Computes the presence of every member of a family group, fresh from the
/// current incident set. Nothing here is persisted.
pub async fn family_presence(
    pool: &DbPool,
    family_id: Uuid,
    viewer_id: &str,
) -> Result<Vec<MemberPresence>, AppError> {
    // 404 for an unknown group rather than an empty member list.
    families::get(pool, family_id).await?;

    let members = families::members(pool, family_id).await?;

    let rows = sqlx::query(queries::SELECT_ACTIVE_REPORTERS)
        .fetch_all(pool)
        .await?;
    let mut active_reporters = HashSet::with_capacity(rows.len());
    for row in rows {
        active_reporters.insert(row.try_get::<String, _>("reporter_id")?);
    }

    let now = Utc::now();

    Ok(members
        .into_iter()
        .map(|member| {
            let status = resolve_status(
                &member.person_id,
                member.last_seen_at,
                viewer_id,
                &active_reporters,
                now,
            );
            MemberPresence {
                person_id: member.person_id,
                name: member.name,
                status,
                last_location: member.last_location,
                last_seen_at: member.last_seen_at,
            }
        })
        .collect())
}
