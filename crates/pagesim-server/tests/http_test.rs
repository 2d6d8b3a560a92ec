//! End-to-end tests of the HTTP API against an in-process router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pagesim_common::{Algorithm, EngineConfig};
use pagesim_server::{create_router, BusyPolicy, SessionService};
use serde_json::{json, Value};
use tower::ServiceExt;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn app() -> Router {
    let session = SessionService::new(EngineConfig::new(8, 3, Algorithm::Fifo), BusyPolicy::Queue)
        .expect("valid config");
    create_router(Arc::new(session))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ── Routes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initial_state() {
    let app = app();
    let (status, body) = get(&app, "/state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_table_size"], 8);
    assert_eq!(body["frame_count"], 3);
    assert_eq!(body["frames"], json!([null, null, null]));
    assert_eq!(body["total_accesses"], 0);
    assert_eq!(body["total_faults"], 0);
    assert_eq!(body["algorithm"], "FIFO");
    assert_eq!(body["page_table"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn test_access_fault_then_hit() {
    let app = app();

    let (status, body) = post(&app, "/access", json!({"page": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 5);
    assert_eq!(body["resulted_in_fault"], true);
    assert_eq!(body["evicted_page"], Value::Null);
    assert_eq!(body["frame"], 0);
    assert_eq!(body["frames"], json!([5, null, null]));
    assert_eq!(body["last_fault"], true);

    let (status, body) = post(&app, "/access", json!({"page": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resulted_in_fault"], false);
    assert_eq!(body["total_accesses"], 2);
    assert_eq!(body["total_faults"], 1);
    assert_eq!(body["hit_rate"], 50.0);
}

#[tokio::test]
async fn test_access_out_of_range_keeps_state() {
    let app = app();
    post(&app, "/access", json!({"page": 1})).await;

    for page in [8, -1] {
        let (status, body) = post(&app, "/access", json!({ "page": page })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "OutOfRange");
        assert!(body["error"].as_str().is_some());
    }

    let (_, state) = get(&app, "/state").await;
    assert_eq!(state["total_accesses"], 1);
    assert_eq!(state["frames"], json!([1, null, null]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();

    let (status, body) = post(&app, "/access", json!({"pg": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");

    let request = Request::builder()
        .method("POST")
        .uri("/access")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "BadRequest");
}

#[tokio::test]
async fn test_set_algorithm_resets_session() {
    let app = app();
    post(&app, "/access", json!({"page": 1})).await;

    let (status, body) = post(
        &app,
        "/set_algorithm",
        json!({"algorithm": "lru", "frame_count": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["algorithm"], "LRU");
    assert_eq!(body["frame_count"], 4);
    assert_eq!(body["state"]["total_accesses"], 0);
    assert_eq!(body["state"]["frames"], json!([null, null, null, null]));
}

#[tokio::test]
async fn test_set_algorithm_rejections() {
    let app = app();

    let (status, body) = post(&app, "/set_algorithm", json!({"algorithm": "clock"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidConfig");

    let (status, body) = post(
        &app,
        "/set_algorithm",
        json!({"algorithm": "fifo", "frame_count": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidConfig");

    let (status, body) = post(&app, "/set_algorithm", json!({"algorithm": "optimal"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MissingReferenceString");

    let (_, state) = get(&app, "/state").await;
    assert_eq!(state["algorithm"], "FIFO");
    assert_eq!(state["frame_count"], 3);
}

#[tokio::test]
async fn test_set_algorithm_oversized_frame_count() {
    let app = app();
    post(&app, "/access", json!({"page": 2})).await;
    let (_, before) = get(&app, "/state").await;

    for frame_count in [json!(9), json!(i64::MAX)] {
        let (status, body) = post(
            &app,
            "/set_algorithm",
            json!({"algorithm": "fifo", "frame_count": frame_count}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidConfig");
    }

    let (_, after) = get(&app, "/state").await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_optimal_simulation() {
    let app = app();
    let refs = json!([1, 2, 3, 1, 4, 5]);

    let (status, _) = post(
        &app,
        "/set_algorithm",
        json!({"algorithm": "OPTIMAL", "reference_string": refs}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/simulate", json!({ "sequence": refs })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_faults"], 5);
    assert_eq!(body["records"][4]["evicted_page"], 1);
    assert_eq!(body["records"][5]["evicted_page"], 2);
    assert_eq!(body["final_state"]["frames"], json!([4, 5, 3]));
    assert_eq!(body["final_state"]["reference_string"], refs);
}

#[tokio::test]
async fn test_simulate_rejects_whole_sequence() {
    let app = app();

    let (status, body) = post(&app, "/simulate", json!({"sequence": [1, 2, 99]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "OutOfRange");

    let (_, state) = get(&app, "/state").await;
    assert_eq!(state["total_accesses"], 0);
}

#[tokio::test]
async fn test_reset() {
    let app = app();
    post(&app, "/simulate", json!({"sequence": [1, 2, 3, 4]})).await;

    let (status, body) = post(&app, "/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["state"]["total_accesses"], 0);
    assert_eq!(body["state"]["total_faults"], 0);
    assert_eq!(body["state"]["frames"], json!([null, null, null]));
    assert_eq!(body["state"]["last_accessed"], Value::Null);
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app();
    let (status, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
