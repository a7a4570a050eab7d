use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use services::{
    attendance_poll::AttendancePollService, attendance_record::AttendanceRecordService,
};
use util::state::AppState;
use validator::Validate;

use super::common::{MarkAttendanceRequest, StartPollRequest};
use crate::response::ApiResponse;
use crate::routes::common::{json_rejected, service_error, validation_failed};

/// POST /attendance/start
///
/// Starts a new attendance poll beginning now. Any previously active poll is
/// deactivated in the same transaction.
///
/// ### Request Body
/// ```json
/// { "duration_minutes": 5, "created_by": "Dr. Smith" }
/// ```
/// `created_by` is optional and defaults to `"admin"`.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3,
///     "start_time": "2025-09-08T10:00:00Z",
///     "end_time": "2025-09-08T10:05:00Z",
///     "duration_minutes": 5,
///     "is_active": true,
///     "created_by": "admin",
///     "created_at": "2025-09-08T10:00:00Z"
///   },
///   "message": "Attendance poll started"
/// }
/// ```
///
/// - `400 Bad Request` (malformed body, or duration outside 1..=60)
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "duration_minutes must be between 1 and 60"
/// }
/// ```
pub async fn start_poll(
    State(state): State<AppState>,
    payload: Result<Json<StartPollRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejected(rejection),
    };

    if let Err(errors) = req.validate() {
        return validation_failed(&errors);
    }

    match AttendancePollService::start_poll(
        state.db(),
        req.duration_minutes,
        req.created_by.as_deref(),
        Utc::now(),
    )
    .await
    {
        Ok(poll) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(poll, "Attendance poll started")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// POST /attendance/mark
///
/// Marks a student present in a poll. Marking twice returns the original
/// record unchanged.
///
/// ### Request Body
/// ```json
/// { "student_id": 1, "poll_id": 3 }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 10,
///     "student_id": 1,
///     "poll_id": 3,
///     "marked_at": "2025-09-08T10:01:12Z",
///     "student_name": "Ada",
///     "student_roll_no": "CS001"
///   },
///   "message": "Attendance marked"
/// }
/// ```
///
/// - `404 Not Found` (`"Student not found"` or `"Poll not found"`, student checked first)
/// - `400 Bad Request` (malformed body, `"Poll has expired"` or `"Poll has not yet started"`)
pub async fn mark_attendance(
    State(state): State<AppState>,
    payload: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return json_rejected(rejection),
    };

    match AttendanceRecordService::mark_attendance(
        state.db(),
        req.student_id,
        req.poll_id,
        Utc::now(),
    )
    .await
    {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(record, "Attendance marked")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
