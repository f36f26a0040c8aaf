mod common;

use chrono::{DateTime, Utc};
use common::{spawn_app, spawn_app_with};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn post_incident(base_url: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/incidents", base_url))
        .json(&body)
        .send()
        .await
        .expect("post incident")
}

async fn get_json(url: String) -> Value {
    reqwest::get(url)
        .await
        .expect("get")
        .json()
        .await
        .expect("json body")
}

fn sample_incident() -> Value {
    json!({
        "reporterId": "u1",
        "reporterName": "Asha",
        "location": { "lat": 28.6, "lng": 77.2 }
    })
}

#[tokio::test]
async fn create_applies_defaults_and_shows_in_active_list() {
    let app = spawn_app().await;

    let res = post_incident(&app.base_url, sample_incident()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let incident: Value = res.json().await.unwrap();

    assert_eq!(incident["reporterId"], "u1");
    assert_eq!(incident["category"], "general");
    assert_eq!(incident["priority"], "high");
    assert_eq!(incident["status"], "active");
    assert!(incident["resolvedAt"].is_null());

    let active = get_json(format!("{}/incidents/active", app.base_url)).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], incident["id"]);
    assert_eq!(active[0]["location"]["lat"], 28.6);
    assert_eq!(active[0]["location"]["lng"], 77.2);
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = spawn_app().await;

    let res = post_incident(
        &app.base_url,
        json!({ "reporterId": "u1", "reporterName": "Asha" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].is_string());

    let res = post_incident(
        &app.base_url,
        json!({ "reporterName": "Asha", "location": { "lat": 1.0, "lng": 2.0 } }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_only_touches_supplied_detail_fields() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let incident: Value = post_incident(&app.base_url, sample_incident())
        .await
        .json()
        .await
        .unwrap();
    let id = incident["id"].as_str().unwrap();

    let res = client
        .put(format!("{}/incidents/{}", app.base_url, id))
        .json(&json!({
            "category": "medical",
            "vulnerablePersons": { "infants": true }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();

    assert_eq!(updated["category"], "medical");
    assert_eq!(updated["vulnerablePersons"]["infants"], true);
    assert_eq!(updated["vulnerablePersons"]["elderly"], false);
    // Location, priority and status are untouched by a detail update.
    assert_eq!(updated["location"]["lat"], 28.6);
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["status"], "active");

    // The wire name from the public contract is accepted as an alias.
    let updated: Value = client
        .put(format!("{}/incidents/{}", app.base_url, id))
        .json(&json!({ "freeTextDetails": "trapped under rubble" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["details"], "trapped under rubble");
    assert_eq!(updated["category"], "medical");
}

#[tokio::test]
async fn update_unknown_incident_is_not_found() {
    let app = spawn_app().await;

    let res = reqwest::Client::new()
        .put(format!(
            "{}/incidents/00000000-0000-0000-0000-000000000000",
            app.base_url
        ))
        .json(&json!({ "category": "fire" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = reqwest::Client::new()
        .put(format!("{}/incidents/not-a-uuid", app.base_url))
        .json(&json!({ "category": "fire" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resolve_empties_active_list_and_stamps_resolved_at() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let incident: Value = post_incident(&app.base_url, sample_incident())
        .await
        .json()
        .await
        .unwrap();
    let id = incident["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/incidents/{}/resolve", app.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let active = get_json(format!("{}/incidents/active", app.base_url)).await;
    assert_eq!(active.as_array().unwrap().len(), 0);

    let fetched = get_json(format!("{}/incidents/{}", app.base_url, id)).await;
    assert_eq!(fetched["status"], "resolved");

    let created_at: DateTime<Utc> = fetched["createdAt"].as_str().unwrap().parse().unwrap();
    let resolved_at: DateTime<Utc> = fetched["resolvedAt"].as_str().unwrap().parse().unwrap();
    assert!(resolved_at >= created_at);
}

#[tokio::test]
async fn double_resolve_is_a_conflict() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let incident: Value = post_incident(&app.base_url, sample_incident())
        .await
        .json()
        .await
        .unwrap();
    let id = incident["id"].as_str().unwrap();
    let resolve_url = format!("{}/incidents/{}/resolve", app.base_url, id);

    let res = client.post(&resolve_url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let first: Value = res.json().await.unwrap();

    let res = client.post(&resolve_url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The original resolution timestamp is preserved.
    let fetched = get_json(format!("{}/incidents/{}", app.base_url, id)).await;
    assert_eq!(fetched["resolvedAt"], first["resolvedAt"]);
}

#[tokio::test]
async fn resolve_unknown_incident_is_not_found() {
    let app = spawn_app().await;

    let res = reqwest::Client::new()
        .post(format!(
            "{}/incidents/00000000-0000-0000-0000-000000000000/resolve",
            app.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn realert_allowed_by_default() {
    let app = spawn_app().await;

    assert_eq!(
        post_incident(&app.base_url, sample_incident()).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        post_incident(&app.base_url, sample_incident()).await.status(),
        StatusCode::CREATED
    );

    let active = get_json(format!("{}/incidents/active", app.base_url)).await;
    assert_eq!(active.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn realert_rejected_when_disabled() {
    let app = spawn_app_with(false).await;

    let first: Value = post_incident(&app.base_url, sample_incident())
        .await
        .json()
        .await
        .unwrap();

    let res = post_incident(&app.base_url, sample_incident()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Once the open incident is resolved, the reporter may alert again.
    let id = first["id"].as_str().unwrap();
    reqwest::Client::new()
        .post(format!("{}/incidents/{}/resolve", app.base_url, id))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let res = post_incident(&app.base_url, sample_incident()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn active_list_is_ordered_by_creation_time() {
    let app = spawn_app().await;

    for name in ["first", "second", "third"] {
        let mut body = sample_incident();
        body["reporterName"] = json!(name);
        post_incident(&app.base_url, body).await;
    }

    let active = get_json(format!("{}/incidents/active", app.base_url)).await;
    let names: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["reporterName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
}
