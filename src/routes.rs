use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::family::{Family, FamilyDetail};
use crate::models::incident::{Category, Incident, Location, Priority, VulnerablePersons};
use crate::models::presence::MemberPresence;
use crate::store::{families, incidents, presence};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub allow_realert: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/incidents", post(create_incident))
        .route("/incidents/active", get(list_active_incidents))
        .route("/incidents/:id", get(get_incident).put(update_incident))
        .route("/incidents/:id/resolve", post(resolve_incident))
        .route("/presence/location", post(report_location))
        .route("/families", post(create_family))
        .route("/families/join", post(join_family))
        .route("/families/:id", get(family_detail))
        .route("/families/:id/presence", get(family_presence))
        .route("/persons/:id/families", get(person_families))
        .with_state(state)
}

fn parse_id(kind: &str, raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("invalid {} id: {}", kind, raw)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateIncidentPayload {
    reporter_id: Option<String>,
    reporter_name: Option<String>,
    location: Option<Location>,
    category: Option<Category>,
    priority: Option<Priority>,
}

async fn create_incident(
    State(state): State<AppState>,
    Json(payload): Json<CreateIncidentPayload>,
) -> Result<(StatusCode, Json<Incident>), AppError> {
    let new = incidents::NewIncident {
        reporter_id: payload.reporter_id.unwrap_or_default(),
        reporter_name: payload.reporter_name.unwrap_or_default(),
        location: payload
            .location
            .ok_or_else(|| AppError::Validation("location is required".to_string()))?,
        category: payload.category.unwrap_or_default(),
        priority: payload.priority.unwrap_or_default(),
    };

    let incident = incidents::create(&state.pool, new, state.allow_realert).await?;
    Ok((StatusCode::CREATED, Json(incident)))
}

async fn list_active_incidents(
    State(state): State<AppState>,
) -> Result<Json<Vec<Incident>>, AppError> {
    Ok(Json(incidents::list_active(&state.pool).await?))
}

async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Incident>, AppError> {
    let id = parse_id("incident", &id)?;
    Ok(Json(incidents::get(&state.pool, id).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateIncidentPayload {
    category: Option<Category>,
    #[serde(alias = "freeTextDetails")]
    details: Option<String>,
    vulnerable_persons: Option<VulnerablePersons>,
}

async fn update_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateIncidentPayload>,
) -> Result<Json<Incident>, AppError> {
    let id = parse_id("incident", &id)?;
    let update = incidents::DetailsUpdate {
        category: payload.category,
        details: payload.details,
        vulnerable_persons: payload.vulnerable_persons,
    };
    Ok(Json(incidents::update_details(&state.pool, id, update).await?))
}

async fn resolve_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Incident>, AppError> {
    let id = parse_id("incident", &id)?;
    Ok(Json(incidents::resolve(&state.pool, id).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationReportPayload {
    person_id: Option<String>,
    person_name: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn report_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationReportPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    let location = match (payload.lat, payload.lng) {
        (Some(lat), Some(lng)) => Location { lat, lng },
        _ => return Err(AppError::Validation("lat and lng are required".to_string())),
    };

    presence::report_location(
        &state.pool,
        payload.person_id.as_deref().unwrap_or_default(),
        payload.person_name.as_deref(),
        location,
    )
    .await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFamilyPayload {
    person_id: Option<String>,
    person_name: Option<String>,
    name: Option<String>,
}

async fn create_family(
    State(state): State<AppState>,
    Json(payload): Json<CreateFamilyPayload>,
) -> Result<(StatusCode, Json<Family>), AppError> {
    let family = families::create(
        &state.pool,
        payload.person_id.as_deref().unwrap_or_default(),
        payload.person_name.as_deref(),
        payload.name.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(family)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinFamilyPayload {
    person_id: Option<String>,
    person_name: Option<String>,
    code: Option<String>,
}

async fn join_family(
    State(state): State<AppState>,
    Json(payload): Json<JoinFamilyPayload>,
) -> Result<Json<Family>, AppError> {
    let family = families::join(
        &state.pool,
        payload.person_id.as_deref().unwrap_or_default(),
        payload.person_name.as_deref(),
        payload.code.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(family))
}

async fn family_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FamilyDetail>, AppError> {
    let id = parse_id("family", &id)?;
    Ok(Json(families::detail(&state.pool, id).await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceQuery {
    viewer_id: Option<String>,
}

async fn family_presence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PresenceQuery>,
) -> Result<Json<Vec<MemberPresence>>, AppError> {
    let id = parse_id("family", &id)?;
    let viewer_id = query.viewer_id.unwrap_or_default();
    Ok(Json(
        presence::family_presence(&state.pool, id, &viewer_id).await?,
    ))
}

async fn person_families(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Family>>, AppError> {
    Ok(Json(families::list_for_person(&state.pool, &id).await?))
}
