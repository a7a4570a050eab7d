//! # attendance Routes Module
//!
//! Wires up the `/attendance` endpoint group: starting polls, polling the
//! current status, marking, and reports.
//!
//! ## Structure
//! - `post.rs` — start a poll, mark attendance
//! - `get.rs` — current status, poll reports, poll listing, student history
//! - `common.rs` — request bodies

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

use get::{current_status, get_poll, list_polls, poll_report, student_history};
use post::{mark_attendance, start_poll};

/// Builds the `/attendance` route group.
///
/// - `POST /attendance/start` → `start_poll`
/// - `GET /attendance/current` → `current_status`
/// - `POST /attendance/mark` → `mark_attendance`
/// - `GET /attendance/logs` → `list_polls`
/// - `GET /attendance/logs/{poll_id}` → `poll_report`
/// - `GET /attendance/polls/{poll_id}` → `get_poll`
/// - `GET /attendance/student/{student_id}` → `student_history`
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_poll))
        .route("/current", get(current_status))
        .route("/mark", post(mark_attendance))
        .route("/logs", get(list_polls))
        .route("/logs/{poll_id}", get(poll_report))
        .route("/polls/{poll_id}", get(get_poll))
        .route("/student/{student_id}", get(student_history))
}
