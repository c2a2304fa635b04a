//! Auth handlers — login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use authgate_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::error::ApiError;
use crate::dto::response::{MeResponse, MessageResponse, TokenResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Name of the refresh token cookie.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Cookie path; the browser only sends the refresh token to the refresh
/// endpoint.
pub const REFRESH_COOKIE_PATH: &str = "/auth/refresh";

/// POST /login
///
/// Validates credentials and returns an access token. When the stage
/// enables refresh, also sets the scoped refresh cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let outcome = state.session_manager.login(&req.username, &req.password)?;

    let jar = match outcome.refresh {
        Some(refresh) => {
            let cookie = Cookie::build((REFRESH_COOKIE, refresh.token))
                .http_only(true)
                .same_site(SameSite::Lax)
                .path(REFRESH_COOKIE_PATH)
                .max_age(time::Duration::seconds(refresh.expires_in_seconds as i64))
                .build();
            jar.add(cookie)
        }
        None => jar,
    };

    Ok((jar, Json(TokenResponse::from(outcome.access))))
}

/// POST /auth/refresh
///
/// Mints a new access token from the refresh cookie. The refresh token is
/// not rotated; the cookie stays as-is.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<TokenResponse>, ApiError> {
    let cookie = jar
        .get(REFRESH_COOKIE)
        .ok_or_else(|| AppError::unauthorized("Missing refresh cookie"))?;

    let access = state.session_manager.refresh(cookie.value())?;

    Ok(Json(TokenResponse::from(access)))
}

/// POST /logout
///
/// Best-effort: revokes the session if the cookie is present and
/// verifiable, and always instructs the client to clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie_value = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    state.session_manager.logout(cookie_value.as_deref());

    // `remove` only answers cookies present in the request jar, and the
    // refresh cookie's path scope keeps browsers from sending it here.
    // Adding an expired cookie makes the clear instruction unconditional.
    let jar = jar.add(
        Cookie::build((REFRESH_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path(REFRESH_COOKIE_PATH)
            .max_age(time::Duration::ZERO)
            .build(),
    );

    (
        jar,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// GET /me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: auth.user_id,
    })
}
