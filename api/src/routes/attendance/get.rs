use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use services::{attendance_poll::AttendancePollService, attendance_report::AttendanceReportService};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{SliceQuery, service_error};

const DEFAULT_POLL_LIMIT: u64 = 50;

/// GET /attendance/current
///
/// Reports the poll that is flagged active and whose window contains the
/// current time. A poll that has run past its end time reports as inactive.
///
/// ### Responses
///
/// - `200 OK` (open poll)
/// ```json
/// {
///   "success": true,
///   "data": {
///     "is_active": true,
///     "poll_id": 3,
///     "start_time": "2025-09-08T10:00:00Z",
///     "end_time": "2025-09-08T10:05:00Z",
///     "remaining_seconds": 210
///   },
///   "message": "Current poll status"
/// }
/// ```
///
/// - `200 OK` (nothing open): `is_active` is `false` and every other field is `null`.
pub async fn current_status(State(state): State<AppState>) -> Response {
    match AttendancePollService::current_status(state.db(), Utc::now()).await {
        Ok(status) => (
            StatusCode::OK,
            Json(ApiResponse::success(status, "Current poll status")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/logs/{poll_id}
///
/// Present/absent summary for one poll, with every present record joined to
/// the student's current name and roll number.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "poll_id": 3,
///     "start_time": "2025-09-08T10:00:00Z",
///     "end_time": "2025-09-08T10:05:00Z",
///     "total_students": 3,
///     "present_count": 2,
///     "absent_count": 1,
///     "attendance_percentage": 66.67,
///     "records": [ { "id": 10, "student_id": 1, "student_name": "Ada", ... } ]
///   },
///   "message": "Attendance report retrieved"
/// }
/// ```
///
/// - `404 Not Found` (`"Poll not found"`)
pub async fn poll_report(State(state): State<AppState>, Path(poll_id): Path<i64>) -> Response {
    match AttendanceReportService::poll_report(state.db(), poll_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Attendance report retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/logs?skip=0&limit=50
///
/// Lists polls newest first. `skip` defaults to 0 and `limit` to 50.
pub async fn list_polls(State(state): State<AppState>, Query(q): Query<SliceQuery>) -> Response {
    let (skip, limit) = q.resolve(DEFAULT_POLL_LIMIT);

    match AttendancePollService::list_polls(state.db(), skip, limit).await {
        Ok(polls) => (
            StatusCode::OK,
            Json(ApiResponse::success(polls, "Polls retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/polls/{poll_id}
///
/// - `200 OK` with the poll
/// - `404 Not Found` (`"Poll not found"`)
pub async fn get_poll(State(state): State<AppState>, Path(poll_id): Path<i64>) -> Response {
    match AttendancePollService::get_poll(state.db(), poll_id).await {
        Ok(poll) => (
            StatusCode::OK,
            Json(ApiResponse::success(poll, "Poll retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /attendance/student/{student_id}
///
/// A student's attendance history, newest mark first. Each record carries
/// the poll's `poll_start_time` and `poll_end_time`.
///
/// - `200 OK` (possibly an empty list)
/// - `404 Not Found` (`"Student not found"`)
pub async fn student_history(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Response {
    match AttendanceReportService::student_history(state.db(), student_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(records, "Attendance history retrieved")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
