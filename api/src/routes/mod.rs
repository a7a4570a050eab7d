//! HTTP route entry point.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/auth` → Placeholder login/logout
//! - `/students` → Student registry
//! - `/attendance` → Polls, marking and reports

use crate::routes::{
    attendance::attendance_routes, auth::auth_routes, health::health_routes,
    students::students_routes,
};
use axum::{Router, routing::get};
use util::state::AppState;

pub mod attendance;
pub mod auth;
pub mod common;
pub mod health;
pub mod index;
pub mod students;

/// Builds the application router for every route group.
///
/// The returned router has its state applied and can be merged directly.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", students_routes())
        .route(
            "/students/",
            get(students::get::list_students).post(students::post::create_student),
        )
        .nest("/attendance", attendance_routes())
        .with_state(app_state)
}
