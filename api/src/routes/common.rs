//! Helpers shared by every route group.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::ServiceError;
use tracing::error;
use validator::ValidationErrors;

use crate::response::{ApiResponse, Empty};

/// Joins the messages of every failed field rule with `"; "`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// `400 Bad Request` carrying the joined validator messages.
pub fn validation_failed(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(format_validation_errors(errors))),
    )
        .into_response()
}

/// `400 Bad Request` for a body that isn't the expected JSON shape.
pub fn json_rejected(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<Empty>::error(rejection.body_text())),
    )
        .into_response()
}

/// HTTP status for each service failure.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::InvalidWindow(_) => StatusCode::BAD_REQUEST,
        ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts a service failure into the standard error envelope.
pub fn service_error(err: ServiceError) -> Response {
    let status = status_for(&err);
    let message = match &err {
        ServiceError::Validation(msg) | ServiceError::Conflict(msg) => msg.clone(),
        other => other.to_string(),
    };

    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }

    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

/// `?skip=&limit=` slice parameters.
#[derive(Debug, Deserialize)]
pub struct SliceQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl SliceQuery {
    pub fn resolve(&self, default_limit: u64) -> (u64, u64) {
        (self.skip.unwrap_or(0), self.limit.unwrap_or(default_limit))
    }
}
