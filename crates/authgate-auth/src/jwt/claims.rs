//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID. For refresh tokens this is the session ID used as the
    /// revocation store key.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    #[serde(rename = "typ")]
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

impl Claims {
    /// Returns the session ID (refresh tokens only carry a meaningful one).
    pub fn session_id(&self) -> Uuid {
        self.jti
    }
}
