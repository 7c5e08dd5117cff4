#![allow(dead_code)]

use anyhow::{anyhow, Result};
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower::ServiceExt;

use brae::infra::memory::MemoryStore;
use brae::infra::store::{Store, UpdateOutcome, SUBMISSIONS};
use brae::{http, AppState};

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token-12345";
pub const FIXTURE_CATALOG: &str = "tests/fixtures/activities.json";

// ---------------------------------------------------------------------------
// TestApp — shared, lazily initialized once per test binary
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

static TEST_APP: OnceCell<TestApp> = OnceCell::const_new();

/// Get (or lazily create) the shared TestApp instance.
pub async fn app() -> &'static TestApp {
    TEST_APP.get_or_init(|| async { TestApp::setup() }).await
}

impl TestApp {
    fn setup() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_router(store.clone(), FIXTURE_CATALOG, Some(TEST_ADMIN_TOKEN));
        TestApp { router, store }
    }

    // ------------------------------------------------------------------
    // Low-level request helper
    // ------------------------------------------------------------------
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        request_router(&self.router, method, path, body, headers).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None, &[]).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    /// GET with an admin token in the x-admin-token header.
    pub async fn get_admin(&self, path: &str, admin_token: Option<&str>) -> TestResponse {
        let mut headers = vec![];
        if let Some(t) = admin_token {
            headers.push(("x-admin-token", t));
        }
        self.request(Method::GET, path, None, &headers).await
    }

    /// POST with an admin token in the x-admin-token header.
    pub async fn post_admin(
        &self,
        path: &str,
        body: Value,
        admin_token: Option<&str>,
    ) -> TestResponse {
        let mut headers = vec![];
        if let Some(t) = admin_token {
            headers.push(("x-admin-token", t));
        }
        self.request(Method::POST, path, Some(body), &headers).await
    }

    // ------------------------------------------------------------------
    // Test data helpers
    // ------------------------------------------------------------------

    /// Insert a submission record directly in the store, bypassing the API.
    pub async fn seed_submission(&self, id: &str, status: &str, name: &str, submitted_at: &str) {
        let record = json!({
            "name": name,
            "location": "Fife",
            "description": "seeded record",
            "price": "FREE",
            "cost": "free",
            "status": status,
            "submittedAt": submitted_at,
        });
        self.store
            .put(SUBMISSIONS, id, record)
            .await
            .expect("seed submission failed");
    }

    /// Read a submission record straight from the store for assertions.
    pub async fn submission(&self, id: &str) -> Value {
        self.store
            .get(SUBMISSIONS, id)
            .await
            .expect("store get failed")
            .expect("submission not found")
    }

    pub fn admin_token(&self) -> &str {
        TEST_ADMIN_TOKEN
    }
}

// ---------------------------------------------------------------------------
// One-off routers for degraded-path tests
// ---------------------------------------------------------------------------

pub fn build_router(
    store: Arc<dyn Store>,
    catalog_path: &str,
    admin_token: Option<&str>,
) -> Router {
    let state = AppState {
        store,
        catalog_path: catalog_path.to_string(),
        admin_token: admin_token.map(str::to_string),
    };
    http::router(state)
}

pub async fn request_router(
    router: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("host", "localhost");

    for &(key, value) in headers {
        builder = builder.header(key, value);
    }

    let request = if let Some(body) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("oneshot failed");

    let status = response.status();
    let body_bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes();

    TestResponse { status, body_bytes }
}

/// A store whose every operation fails, for exercising fallback paths.
#[derive(Clone, Default)]
pub struct FailingStore;

#[axum::async_trait]
impl Store for FailingStore {
    async fn ping(&self) -> Result<()> {
        Err(anyhow!("store unreachable"))
    }

    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Value>> {
        Err(anyhow!("store unreachable"))
    }

    async fn put(&self, _collection: &str, _id: &str, _record: Value) -> Result<()> {
        Err(anyhow!("store unreachable"))
    }

    async fn query_by_status(
        &self,
        _collection: &str,
        _status: &str,
    ) -> Result<Vec<(String, Value)>> {
        Err(anyhow!("store unreachable"))
    }

    async fn update_if_status(
        &self,
        _collection: &str,
        _id: &str,
        _patch: Value,
        _expected_status: &str,
    ) -> Result<UpdateOutcome> {
        Err(anyhow!("store unreachable"))
    }
}
