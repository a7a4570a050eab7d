//! # students Routes Module
//!
//! Student registry endpoints under `/students`.

use axum::{
    Router,
    routing::get,
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/students` route group.
///
/// - `POST /students` (or `/students/`) → `post::create_student`
/// - `GET /students` (or `/students/`) → `get::list_students`
/// - `GET /students/{student_id}` → `get::get_student`
/// - `PUT /students/{student_id}` → `put::update_student`
/// - `DELETE /students/{student_id}` → `delete::delete_student`
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_students).post(post::create_student))
        .route(
            "/{student_id}",
            get(get::get_student)
                .put(put::update_student)
                .delete(delete::delete_student),
        )
}
