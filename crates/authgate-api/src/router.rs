//! Route definitions for the AuthGate HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes())
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout))
        .route("/me", get(handlers::auth::me))
}
