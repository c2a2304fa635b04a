//! Token issuing authority — login, refresh, and logout flows.

use std::sync::Arc;

use tracing::{debug, info};

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;

use crate::jwt::encoder::{IssuedAccess, IssuedRefresh};
use crate::jwt::{JwtDecoder, JwtEncoder};

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The minted access token.
    pub access: IssuedAccess,
    /// A refresh token, present only when the stage enables refresh.
    pub refresh: Option<IssuedRefresh>,
}

/// Orchestrates the token lifecycle over the signer and session store.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Token signer.
    encoder: JwtEncoder,
    /// Token verifier.
    decoder: JwtDecoder,
    /// Refresh session registry.
    store: Arc<SessionStore>,
    /// Auth configuration (stage gate, demo credentials).
    config: AuthConfig,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        encoder: JwtEncoder,
        decoder: JwtDecoder,
        store: Arc<SessionStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            encoder,
            decoder,
            store,
            config,
        }
    }

    /// Validates credentials and mints tokens.
    ///
    /// Always issues an access token on success. A refresh token is issued
    /// and its session registered only when the stage enables refresh.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if username != self.config.demo_username || password != self.config.demo_password {
            return Err(AppError::authentication("Bad credentials"));
        }

        let subject = self.config.demo_subject.as_str();
        let access = self.encoder.issue_access(subject)?;

        let refresh = if self.config.refresh_enabled() {
            let issued = self.encoder.issue_refresh(subject)?;
            self.store
                .register(issued.session_id, subject, issued.expires_at);
            Some(issued)
        } else {
            None
        };

        info!(
            user_id = %subject,
            refresh_issued = refresh.is_some(),
            "User logged in"
        );

        Ok(LoginOutcome { access, refresh })
    }

    /// Mints a new access token from a valid refresh token.
    ///
    /// 1. Verify the refresh token's signature and type
    /// 2. Look up its session; the store's expiry is authoritative
    /// 3. Issue a fresh access token bound to the stored subject
    ///
    /// The refresh token itself is not rotated here; the same session is
    /// reused until its TTL elapses or it is revoked.
    pub fn refresh(&self, refresh_token: &str) -> Result<IssuedAccess, AppError> {
        if !self.config.refresh_enabled() {
            return Err(AppError::validation(
                "Refresh tokens are not enabled at this stage",
            ));
        }

        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let session_id = claims.session_id();

        let record = self
            .store
            .lookup(session_id)
            .ok_or_else(|| AppError::unauthorized("Refresh session not found"))?;

        let access = self.encoder.issue_access(&record.subject)?;

        info!(
            user_id = %record.subject,
            session_id = %session_id,
            "Access token refreshed"
        );

        Ok(access)
    }

    /// Revokes the refresh session, best-effort.
    ///
    /// Verification errors are swallowed: logout never fails observably,
    /// and the clear-cookie instruction is issued by the caller regardless.
    pub fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token else {
            debug!("Logout without refresh cookie");
            return;
        };

        match self.decoder.decode_refresh_token(token) {
            Ok(claims) => {
                self.store.revoke(claims.session_id());
                info!(session_id = %claims.session_id(), "Refresh session revoked");
            }
            Err(e) => {
                debug!(error = %e, "Ignoring unverifiable refresh token on logout");
            }
        }
    }

    /// Verifies a bearer access token and returns its subject.
    pub fn authenticate(&self, bearer_token: &str) -> Result<String, AppError> {
        let claims = self.decoder.decode_access_token(bearer_token)?;
        Ok(claims.sub)
    }
}
