//! HTTP-level tests for the advocate directory server.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`, backed
//! by fixture stores or purpose-built test stores.

use std::sync::{Arc, Mutex};

use advocate_core::{
    fixtures, Advocate, AdvocateStore, FixtureStore, NewAdvocate, PhoneNumber, StoreError,
    StoreKind,
};
use advocate_server::{build_router, AppState};
use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

// ── Test stores ────────────────────────────────────────────────

fn jane_doe() -> Advocate {
    Advocate {
        id: 1,
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        city: "Reno".into(),
        degree: "MSW".into(),
        specialties: vec!["Anxiety".into(), "Trauma".into()],
        years_of_experience: 5,
        phone_number: PhoneNumber(5551234567),
        created_at: None,
    }
}

fn omar_reyes() -> Advocate {
    Advocate {
        id: 2,
        first_name: "Omar".into(),
        last_name: "Reyes".into(),
        city: "Tucson".into(),
        degree: "PhD".into(),
        specialties: vec!["Therapy".into()],
        years_of_experience: 10,
        phone_number: PhoneNumber(5559990000),
        created_at: None,
    }
}

struct BrokenStore;

#[async_trait]
impl AdvocateStore for BrokenStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Database
    }

    async fn search(&self, _query: Option<&str>) -> Result<Vec<Advocate>, StoreError> {
        Err(StoreError::Invalid("connection reset".into()))
    }

    async fn insert_many(&self, _advocates: &[NewAdvocate]) -> Result<Vec<Advocate>, StoreError> {
        Err(StoreError::Invalid("connection reset".into()))
    }
}

#[derive(Default)]
struct RecordingStore {
    inserted: Mutex<Vec<Advocate>>,
}

#[async_trait]
impl AdvocateStore for RecordingStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Database
    }

    async fn search(&self, query: Option<&str>) -> Result<Vec<Advocate>, StoreError> {
        let records = self.inserted.lock().unwrap().clone();
        Ok(advocate_core::filter_advocates(&records, query.unwrap_or_default()))
    }

    async fn insert_many(&self, advocates: &[NewAdvocate]) -> Result<Vec<Advocate>, StoreError> {
        let mut inserted = self.inserted.lock().unwrap();
        let start = inserted.len() as i32 + 1;
        let records: Vec<Advocate> = advocates
            .iter()
            .cloned()
            .zip(start..)
            .map(|(a, id)| a.with_id(id))
            .collect();
        inserted.extend(records.iter().cloned());
        Ok(records)
    }
}

// ── Helpers ────────────────────────────────────────────────────

fn app_with(store: impl AdvocateStore + 'static) -> axum::Router {
    build_router(AppState::new(Arc::new(store)))
}

fn fixture_app() -> axum::Router {
    build_router(AppState::fixture())
}

fn jane_app() -> axum::Router {
    app_with(FixtureStore::new(vec![jane_doe(), omar_reyes()]))
}

async fn send(app: axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_backend() {
    let (status, body) = send(fixture_app(), "GET", "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "fixture");
}

#[tokio::test]
async fn test_list_without_search_returns_everything() {
    let (status, body) = send(jane_app(), "GET", "/api/advocates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body["data"][0]["firstName"], "Jane");
    assert_eq!(body["data"][0]["phoneNumber"], 5551234567u64);
}

#[tokio::test]
async fn test_blank_search_returns_everything() {
    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=%20%20").await;
    assert_eq!(ids(&body), vec![1, 2]);
    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=").await;
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_jane_doe_scenario() {
    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=anx").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=10").await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=555").await;
    assert!(ids(&body).is_empty());

    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=jane%20doe").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = send(jane_app(), "GET", "/api/advocates?search=hera").await;
    assert_eq!(ids(&body), vec![2]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let (_, upper) = send(jane_app(), "GET", "/api/advocates?search=RENO").await;
    let (_, lower) = send(jane_app(), "GET", "/api/advocates?search=reno").await;
    assert_eq!(upper, lower);
    assert_eq!(ids(&upper), vec![1]);
}

#[tokio::test]
async fn test_fixture_backend_serves_builtin_set() {
    let (status, body) = send(fixture_app(), "GET", "/api/advocates").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), fixtures::advocates().len());
}

#[tokio::test]
async fn test_store_failure_is_500_with_error_body() {
    let (status, body) = send(app_with(BrokenStore), "GET", "/api/advocates?search=anx").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch advocates");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_seed_without_database_is_400() {
    let (status, body) = send(fixture_app(), "POST", "/api/seed").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Database not connected. Set DATABASE_URL environment variable."
    );
}

#[tokio::test]
async fn test_seed_failure_is_500() {
    let (status, body) = send(app_with(BrokenStore), "POST", "/api/seed").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to seed database");
}

#[tokio::test]
async fn test_seed_then_search() {
    let app = app_with(RecordingStore::default());

    let (status, body) = send(app.clone(), "POST", "/api/seed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advocates"].as_array().unwrap().len(), 15);

    let (_, body) = send(app, "GET", "/api/advocates?search=adhd").await;
    assert_eq!(ids(&body), vec![7, 11]);
}
