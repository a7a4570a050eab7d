use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::response::{ApiResponse, Empty};

/// POST /auth/login
///
/// No credential check yet; always answers `200 OK`.
///
/// ```json
/// {
///   "success": true,
///   "data": null,
///   "message": "Authentication not implemented yet"
/// }
/// ```
pub async fn login() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Authentication not implemented yet")),
    )
}

/// POST /auth/logout
///
/// - `200 OK` with `"Logout successful"`
pub async fn logout() -> impl IntoResponse {
    Json(ApiResponse::success(Empty, "Logout successful"))
}
