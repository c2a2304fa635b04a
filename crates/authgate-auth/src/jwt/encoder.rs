//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use authgate_core::config::auth::AuthConfig;
use authgate_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in seconds.
    access_ttl_seconds: i64,
    /// Refresh token TTL in seconds.
    refresh_ttl_seconds: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// A freshly minted access token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedAccess {
    /// The signed token.
    pub token: String,
    /// TTL declared to the holder, in seconds.
    pub expires_in_seconds: u64,
}

/// A freshly minted refresh token with its session identity.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedRefresh {
    /// The signed token.
    pub token: String,
    /// Session ID embedded as `jti`; the caller must register it in the
    /// session store.
    pub session_id: Uuid,
    /// Expiration timestamp.
    pub expires_at: chrono::DateTime<Utc>,
    /// TTL in seconds, used as the cookie max-age.
    pub expires_in_seconds: u64,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds as i64,
            refresh_ttl_seconds: config.refresh_ttl_seconds as i64,
        }
    }

    /// Generates a new access token for the given subject.
    pub fn issue_access(&self, subject: &str) -> Result<IssuedAccess, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(self.access_ttl_seconds);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(IssuedAccess {
            token,
            expires_in_seconds: self.access_ttl_seconds as u64,
        })
    }

    /// Generates a new refresh token for the given subject.
    ///
    /// The session ID is minted here (Uuid v4, globally unique) and embedded
    /// as `jti`; registering it in the session store is the caller's job.
    pub fn issue_refresh(&self, subject: &str) -> Result<IssuedRefresh, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(self.refresh_ttl_seconds);
        let session_id = Uuid::new_v4();

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: session_id,
            token_type: TokenType::Refresh,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(IssuedRefresh {
            token,
            session_id,
            expires_at: exp,
            expires_in_seconds: self.refresh_ttl_seconds as u64,
        })
    }
}
