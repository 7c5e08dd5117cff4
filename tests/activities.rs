//! Published catalog tests: merging, degradation, and the full
//! submit → approve → publish flow.

mod common;

use axum::http::{Method, StatusCode};
use common::{app, build_router, request_router, FailingStore, FIXTURE_CATALOG};
use serde_json::json;
use std::sync::Arc;

use brae::infra::memory::MemoryStore;
use brae::infra::store::Store;

#[tokio::test]
async fn catalog_merges_static_and_approved_submissions() {
    let store = Arc::new(MemoryStore::new());
    let router = build_router(store.clone(), FIXTURE_CATALOG, None);

    // one approved, one pending, one rejected — only the approved one merges
    for (id, status) in [
        ("approved-park_1", "approved"),
        ("pending-park_2", "pending"),
        ("rejected-park_3", "rejected"),
    ] {
        store
            .put(
                "submissions",
                id,
                json!({
                    "name": format!("{} Park", status),
                    "location": "Fife",
                    "description": "a park",
                    "price": "FREE",
                    "cost": "free",
                    "status": status,
                    "submittedAt": "2026-08-01T10:00:00Z"
                }),
            )
            .await
            .unwrap();
    }

    let resp = request_router(&router, Method::GET, "/activities", None, &[]).await;
    assert_eq!(resp.status, StatusCode::OK);

    let activities = resp.json();
    let activities = activities.as_array().unwrap();
    // 2 static fixtures + 1 approved submission
    assert_eq!(activities.len(), 3);

    let ids: Vec<&str> = activities.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids[0], "static-beach");
    assert_eq!(ids[1], "static-aquarium");
    assert_eq!(ids[2], "submission-approved-park_1");
}

#[tokio::test]
async fn merged_submission_gets_defaults_for_absent_fields() {
    let store = Arc::new(MemoryStore::new());
    let router = build_router(store.clone(), FIXTURE_CATALOG, None);

    store
        .put(
            "submissions",
            "bare-park_1",
            json!({
                "name": "Bare Park",
                "location": "Fife",
                "description": "no optional fields at all",
                "price": "FREE",
                "cost": "free",
                "status": "approved",
                "submittedAt": "2026-08-01T10:00:00Z"
            }),
        )
        .await
        .unwrap();

    let resp = request_router(&router, Method::GET, "/activities", None, &[]).await;
    let activities = resp.json();
    let merged = activities
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "submission-bare-park_1")
        .cloned()
        .unwrap();

    assert_eq!(merged["weather"], json!([]));
    assert_eq!(merged["tags"], json!([]));
    assert_eq!(merged["dog_friendly"], false);
    assert_eq!(merged["accessible"], false);
    // submitter details never leak into the public catalog
    assert!(merged.get("submitterEmail").is_none());
    assert!(merged.get("status").is_none());
}

#[tokio::test]
async fn catalog_falls_back_to_static_list_when_store_fails() {
    let router = build_router(Arc::new(FailingStore), FIXTURE_CATALOG, None);

    let resp = request_router(&router, Method::GET, "/activities", None, &[]).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn catalog_returns_empty_500_when_static_asset_unreadable() {
    let router = build_router(
        Arc::new(MemoryStore::new()),
        "tests/fixtures/does-not-exist.json",
        None,
    );

    let resp = request_router(&router, Method::GET, "/activities", None, &[]).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.json(), json!([]));
}

#[tokio::test]
async fn health_reports_ok_and_degraded() {
    let app = app().await;
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"], "ok");

    let router = build_router(Arc::new(FailingStore), FIXTURE_CATALOG, None);
    let resp = request_router(&router, Method::GET, "/health", None, &[]).await;
    assert_eq!(resp.json()["status"], "degraded");
}

#[tokio::test]
async fn submit_approve_publish_end_to_end() {
    let app = app().await;

    // 1. submit
    let resp = app
        .post_json(
            "/activities/submit",
            json!({
                "name": "Aberdour Beach",
                "location": "Fife",
                "description": "Sandy beach",
                "price": "FREE",
                "cost": "free"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let id = resp.json()["submissionId"].as_str().unwrap().to_string();
    assert!(id.starts_with("aberdour-beach_"));

    // 2. approve
    let resp = app
        .post_admin(
            &format!("/moderation/submissions/{}/approve", id),
            json!({}),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    // 3. the approved activity appears in the published catalog
    let resp = app.get("/activities").await;
    assert_eq!(resp.status, StatusCode::OK);
    let catalog = resp.json();
    let entry = catalog
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "Aberdour Beach")
        .cloned();
    assert!(entry.is_some());
    assert_eq!(entry.unwrap()["id"], format!("submission-{}", id));

    // 4. a second approve conflicts instead of re-stamping
    let stamped = app.submission(&id).await["approvedAt"].clone();
    let resp = app
        .post_admin(
            &format!("/moderation/submissions/{}/approve", id),
            json!({}),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(app.submission(&id).await["approvedAt"], stamped);
}
