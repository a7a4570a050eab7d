use axum::{Json, response::IntoResponse};
use serde::Serialize;
use util::config;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: &'static str,
}

/// GET /
///
/// Service name and version.
///
/// ```json
/// {
///   "success": true,
///   "data": { "name": "classcheck", "version": "0.1.0" },
///   "message": "ClassCheck API"
/// }
/// ```
pub async fn index() -> impl IntoResponse {
    Json(ApiResponse::success(
        ServiceInfo {
            name: config::project_name(),
            version: env!("CARGO_PKG_VERSION"),
        },
        "ClassCheck API",
    ))
}
