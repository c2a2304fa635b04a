//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header and validates it against the issuing authority.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authgate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated subject available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Subject of the validated access token.
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        let user_id = state.session_manager.authenticate(token)?;

        Ok(AuthUser { user_id })
    }
}
