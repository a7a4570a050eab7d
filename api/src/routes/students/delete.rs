use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::student::StudentService;
use util::state::AppState;

use crate::routes::common::service_error;

/// DELETE /students/{student_id}
///
/// Removes the student and every attendance record they hold.
///
/// - `204 No Content`
/// - `404 Not Found` (`"Student not found"`)
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentService::delete(state.db(), student_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error(e),
    }
}
