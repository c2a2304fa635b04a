//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Stage at which refresh tokens become available.
const REFRESH_STAGE: u8 = 2;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_seconds: u64,
    /// Refresh token TTL in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_seconds: u64,
    /// Deployment stage. Stage 1 issues access tokens only; stage 2 and
    /// above also issue refresh tokens.
    #[serde(default = "default_stage")]
    pub stage: u8,
    /// Demo account username.
    #[serde(default = "default_demo_username")]
    pub demo_username: String,
    /// Demo account password.
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
    /// Subject id issued for the demo account.
    #[serde(default = "default_demo_subject")]
    pub demo_subject: String,
}

impl AuthConfig {
    /// Whether the current stage issues and accepts refresh tokens.
    pub fn refresh_enabled(&self) -> bool {
        self.stage >= REFRESH_STAGE
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_seconds: default_access_ttl(),
            refresh_ttl_seconds: default_refresh_ttl(),
            stage: default_stage(),
            demo_username: default_demo_username(),
            demo_password: default_demo_password(),
            demo_subject: default_demo_subject(),
        }
    }
}

fn default_jwt_secret() -> String {
    "dev-secret-change-me".to_string()
}

fn default_access_ttl() -> u64 {
    300
}

fn default_refresh_ttl() -> u64 {
    60 * 60 * 24 * 7
}

fn default_stage() -> u8 {
    2
}

fn default_demo_username() -> String {
    "demo".to_string()
}

fn default_demo_password() -> String {
    "demo".to_string()
}

fn default_demo_subject() -> String {
    "user-1".to_string()
}
