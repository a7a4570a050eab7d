use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::student::StudentService;
use util::state::AppState;
use validator::Validate;

use super::common::UpdateStudentRequest;
use crate::response::ApiResponse;
use crate::routes::common::{json_rejected, service_error, validation_failed};

/// PUT /students/{student_id}
///
/// Partially updates a student. Fields left out of the body keep their value.
///
/// ### Request Body
/// ```json
/// { "department": "Mathematics" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated student
/// - `400 Bad Request` (malformed body, validation failure, or `"Roll number already taken"`)
/// - `404 Not Found` (`"Student not found"`)
pub async fn update_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejected(rejection),
    };

    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match StudentService::update(state.db(), student_id, req.into()).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(student, "Student updated successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
