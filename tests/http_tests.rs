mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::TestDb;
use http_body_util::BodyExt;
use league_api::app::{create_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(test_db: &TestDb) -> Router {
    create_app(AppState::new(test_db.url.as_str()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn get_regulations_over_http() {
    let test_db = TestDb::seeded().await;

    let (status, headers, body) = send(app(&test_db), get("/?endpoint=regulations")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["access-control-allow-origin"], "*");
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["regulations"][0]["title"], "Points");
}

#[tokio::test]
async fn bare_root_serves_standings() {
    let test_db = TestDb::seeded().await;

    let (status, _, body) = send(app(&test_db), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["conferences"][0]["name"], "Western");
}

#[tokio::test]
async fn preflight_over_http() {
    let test_db = TestDb::seeded().await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/?endpoint=admin/teams")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app(&test_db), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, PUT, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn post_team_update_over_http() {
    let test_db = TestDb::seeded().await;

    let request = Request::builder()
        .method("POST")
        .uri("/?endpoint=admin/teams")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id": 5, "name": "Hawks", "points": 14}"#))
        .unwrap();
    let (status, _, body) = send(app(&test_db), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"success": true}));

    let (points,): (i64,) = test_db.fetch_one("SELECT points FROM teams WHERE id = 5").await;
    assert_eq!(points, 14);
}

#[tokio::test]
async fn unknown_endpoint_over_http_is_404() {
    let test_db = TestDb::seeded().await;

    let (status, headers, body) = send(app(&test_db), get("/?endpoint=players")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Endpoint not found"}));
}

#[tokio::test]
async fn uncaught_fault_over_http_is_500() {
    let test_db = TestDb::seeded().await;

    let request = Request::builder()
        .method("PUT")
        .uri("/?endpoint=admin/regulations")
        .body(Body::from("{broken"))
        .unwrap();
    let (status, _, body) = send(app(&test_db), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn health_check_reports_ok() {
    let test_db = TestDb::empty().await;

    let (status, _, body) = send(app(&test_db), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}
