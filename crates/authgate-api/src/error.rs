//! Maps domain `AppError` to HTTP responses.
//!
//! `IntoResponse` cannot be implemented for `AppError` directly (foreign
//! trait, foreign type), so handlers return the local `ApiError` wrapper
//! and `?` converts through `From<AppError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use authgate_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around the domain error.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err.kind {
            // Bad credentials and bad tokens both answer 401; the kinds
            // differ only for diagnostics.
            ErrorKind::Authentication | ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
