//! Application state shared across all handlers.

use std::sync::Arc;

use authgate_auth::jwt::{JwtDecoder, JwtEncoder};
use authgate_auth::session::manager::SessionManager;
use authgate_auth::session::store::SessionStore;
use authgate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Token issuing authority.
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Wires up the full auth stack from configuration.
    pub fn new(config: AppConfig) -> Self {
        let session_store = Arc::new(SessionStore::new());
        let session_manager = Arc::new(SessionManager::new(
            JwtEncoder::new(&config.auth),
            JwtDecoder::new(&config.auth),
            session_store,
            config.auth.clone(),
        ));

        Self {
            config: Arc::new(config),
            session_manager,
        }
    }
}
