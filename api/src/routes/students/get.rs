use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::student::StudentService;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{SliceQuery, service_error};

const DEFAULT_STUDENT_LIMIT: u64 = 100;

/// GET /students?skip=0&limit=100
///
/// Lists students ordered by id.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [ { "id": 1, "name": "Ada Lovelace", "roll_no": "CS001", ... } ],
///   "message": "Students retrieved successfully"
/// }
/// ```
pub async fn list_students(
    State(state): State<AppState>,
    Query(q): Query<SliceQuery>,
) -> Response {
    let (skip, limit) = q.resolve(DEFAULT_STUDENT_LIMIT);

    match StudentService::list(state.db(), skip, limit).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(students, "Students retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /students/{student_id}
///
/// - `200 OK` with the student
/// - `404 Not Found` (`"Student not found"`)
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentService::get(state.db(), student_id).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(student, "Student retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
