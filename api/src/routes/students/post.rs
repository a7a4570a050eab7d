use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::student::StudentService;
use util::state::AppState;
use validator::Validate;

use super::common::CreateStudentRequest;
use crate::response::ApiResponse;
use crate::routes::common::{json_rejected, service_error, validation_failed};

/// POST /students
///
/// Registers a student.
///
/// ### Request Body
/// ```json
/// { "name": "Ada Lovelace", "roll_no": "CS001", "department": "Computer Science" }
/// ```
///
/// ### Validation Rules
/// * `name`: 1-100 characters
/// * `roll_no`: 1-50 characters, unique (case-sensitive)
/// * `department`: 1-100 characters
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "name": "Ada Lovelace",
///     "roll_no": "CS001",
///     "department": "Computer Science",
///     "created_at": "2025-09-08T09:00:00Z"
///   },
///   "message": "Student created successfully"
/// }
/// ```
///
/// - `400 Bad Request` (malformed body, validation failure, or `"Roll number already registered"`)
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejected(rejection),
    };

    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match StudentService::create(state.db(), req.into()).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(student, "Student created successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
