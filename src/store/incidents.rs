use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::{queries, DbPool};
use crate::error::AppError;
use crate::models::incident::{
    Category, Incident, IncidentStatus, Location, Priority, VulnerablePersons,
};

pub struct NewIncident {
    pub reporter_id: String,
    pub reporter_name: String,
    pub location: Location,
    pub category: Category,
    pub priority: Priority,
}

pub struct DetailsUpdate {
    pub category: Option<Category>,
    pub details: Option<String>,
    pub vulnerable_persons: Option<VulnerablePersons>,
}

pub async fn create(
    pool: &DbPool,
    new: NewIncident,
    allow_realert: bool,
) -> Result<Incident, AppError> {
    if new.reporter_id.is_empty() {
        return Err(AppError::Validation("reporterId is required".to_string()));
    }
    if new.reporter_name.is_empty() {
        return Err(AppError::Validation("reporterName is required".to_string()));
    }
    if !new.location.is_finite() {
        return Err(AppError::Validation(
            "location must contain finite lat/lng".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    if !allow_realert {
        let existing = sqlx::query(queries::SELECT_ACTIVE_FOR_REPORTER)
            .bind(&new.reporter_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "reporter {} already has an active incident",
                new.reporter_id
            )));
        }
    }

    let incident = Incident {
        id: Uuid::new_v4(),
        reporter_id: new.reporter_id,
        reporter_name: new.reporter_name,
        location: new.location,
        category: new.category,
        priority: new.priority,
        details: String::new(),
        vulnerable_persons: VulnerablePersons::default(),
        status: IncidentStatus::Active,
        created_at: Utc::now(),
        resolved_at: None,
    };

    sqlx::query(queries::INSERT_INCIDENT)
        .bind(incident.id.to_string())
        .bind(&incident.reporter_id)
        .bind(&incident.reporter_name)
        .bind(incident.location.lat)
        .bind(incident.location.lng)
        .bind(incident.category.as_str())
        .bind(incident.priority.as_str())
        .bind(&incident.details)
        .bind(incident.vulnerable_persons.infants)
        .bind(incident.vulnerable_persons.elderly)
        .bind(incident.status.as_str())
        .bind(incident.created_at)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "Opened incident {} for reporter {}",
        incident.id, incident.reporter_id
    );

    Ok(incident)
}

pub async fn get(pool: &DbPool, id: Uuid) -> Result<Incident, AppError> {
    sqlx::query_as::<_, Incident>(queries::SELECT_INCIDENT)
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("incident {} not found", id)))
}

pub async fn list_active(pool: &DbPool) -> Result<Vec<Incident>, AppError> {
    let incidents = sqlx::query_as::<_, Incident>(queries::SELECT_ACTIVE_INCIDENTS)
        .fetch_all(pool)
        .await?;
    Ok(incidents)
}

/// Partial update of the mutable detail fields. Status, priority and
/// location are never touched here.
pub async fn update_details(
    pool: &DbPool,
    id: Uuid,
    update: DetailsUpdate,
) -> Result<Incident, AppError> {
    let result = sqlx::query(queries::UPDATE_INCIDENT_DETAILS)
        .bind(update.category.map(|c| c.as_str()))
        .bind(update.details)
        .bind(update.vulnerable_persons.map(|v| v.infants))
        .bind(update.vulnerable_persons.map(|v| v.elderly))
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("incident {} not found", id)));
    }

    get(pool, id).await
}

/// Marks an incident resolved. The guard `AND status = 'active'` makes the
/// transition a single atomic document mutation; resolving twice is a
/// conflict rather than an overwrite of `resolved_at`.
pub async fn resolve(pool: &DbPool, id: Uuid) -> Result<Incident, AppError> {
    let result = sqlx::query(queries::RESOLVE_INCIDENT)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        // Distinguish an unknown id from an already-resolved incident.
        get(pool, id).await?;
        return Err(AppError::Conflict(format!(
            "incident {} is already resolved",
            id
        )));
    }

    info!("Resolved incident {}", id);

    get(pool, id).await
}
