//! HTTP Error Mapping
//!
//! Maps application errors to status codes and a `{ "error": message }` body.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moveops_core::domain::DomainError;
use moveops_core::error::AppError;
use serde_json::json;

/// Handler error: an [`AppError`] that knows how to become a response
#[derive(Debug)]
pub struct ApiError(pub AppError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(AppError::Domain(err))
    }
}

// Malformed bodies and path segments are client errors, reported in the same
// JSON shape as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(AppError::Validation(rejection.body_text()))
    }
}

/// HTTP status for an application error
pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) | AppError::Serialization(_) => StatusCode::BAD_REQUEST,
        AppError::Domain(DomainError::ValidationError(_))
        | AppError::Domain(DomainError::UnknownPauseAction(_)) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) | AppError::InvalidState(_) => StatusCode::CONFLICT,
        AppError::Domain(DomainError::InvalidStateTransition { .. }) => StatusCode::CONFLICT,
        AppError::Domain(DomainError::UnknownStatus(_))
        | AppError::Database(_)
        | AppError::Io(_)
        | AppError::Config(_)
        | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message without the variant prefix of `AppError`'s Display
fn message_for(err: &AppError) -> String {
    match err {
        AppError::Validation(msg)
        | AppError::Database(msg)
        | AppError::Config(msg)
        | AppError::NotFound(msg)
        | AppError::Conflict(msg)
        | AppError::InvalidState(msg)
        | AppError::Internal(msg) => msg.clone(),
        AppError::Domain(e) => e.to_string(),
        AppError::Io(e) => e.to_string(),
        AppError::Serialization(e) => e.to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = message_for(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
