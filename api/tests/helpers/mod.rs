#![allow(dead_code)]

use api::app;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{DateTime, Duration, Utc};
use db::{models::attendance_poll, test_utils::setup_test_db};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;
use util::state::AppState;

/// Full router over a fresh, migrated in-memory database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    (app(AppState::new(db.clone())), db)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends `req` and decodes the body; an empty body decodes as `Value::Null`.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub async fn create_student(app: &Router, name: &str, roll_no: &str) -> i64 {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/students",
            serde_json::json!({ "name": name, "roll_no": roll_no, "department": "Computer Science" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

pub async fn start_poll(app: &Router, minutes: i32) -> i64 {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/attendance/start",
            serde_json::json!({ "duration_minutes": minutes }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

/// Inserts a poll directly, for windows the HTTP surface can't produce.
pub async fn insert_poll(
    db: &DatabaseConnection,
    start: DateTime<Utc>,
    minutes: i32,
    is_active: bool,
) -> i64 {
    attendance_poll::ActiveModel {
        start_time: Set(start),
        end_time: Set(start + Duration::minutes(i64::from(minutes))),
        duration_minutes: Set(minutes),
        is_active: Set(is_active),
        created_by: Set("admin".to_string()),
        created_at: Set(start),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}
