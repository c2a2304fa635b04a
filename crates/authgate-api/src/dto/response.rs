//! Response DTOs. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use authgate_auth::jwt::encoder::IssuedAccess;

/// Access token response returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The bearer access token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Declared access token TTL in seconds.
    pub expires_in_sec: u64,
}

impl From<IssuedAccess> for TokenResponse {
    fn from(issued: IssuedAccess) -> Self {
        Self {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in_sec: issued.expires_in_seconds,
        }
    }
}

/// Authenticated identity response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Subject of the presented access token.
    pub user_id: String,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}
