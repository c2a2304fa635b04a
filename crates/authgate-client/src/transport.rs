//! Network seam between the consumer stack and the issuing authority.
//!
//! `AuthTransport` keeps the cache, coordinator, and call wrapper testable
//! without a server; `HttpTransport` is the real reqwest implementation
//! with a cookie store carrying the refresh cookie.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;

/// A token as declared by the server, with its advertised TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The bearer access token.
    pub access_token: String,
    /// Declared TTL in seconds.
    pub expires_in_sec: u64,
}

/// Operations the consumer stack performs against the authority.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// POST /login with credentials.
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, ClientError>;

    /// POST /auth/refresh using the stored refresh cookie.
    async fn refresh(&self) -> Result<IssuedToken, ClientError>;

    /// POST /logout, best-effort.
    async fn logout(&self) -> Result<(), ClientError>;

    /// Performs a protected call with the given bearer token attached.
    async fn call(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<Value, ClientError>;
}

/// Wire shape of the server's token responses.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponseBody {
    access_token: String,
    expires_in_sec: u64,
}

/// Wire shape of the server's error responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed transport. The cookie store holds the refresh cookie so
/// refresh and logout calls carry it automatically.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_message(response: reqwest::Response) -> String {
        match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "no error body".to_string(),
        }
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, ClientError> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::BadCredentials(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        let body: TokenResponseBody = response.json().await?;
        Ok(IssuedToken {
            access_token: body.access_token,
            expires_in_sec: body.expires_in_sec,
        })
    }

    async fn refresh(&self) -> Result<IssuedToken, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .send()
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::RefreshRejected(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(ClientError::RefreshFailed(format!(
                "status {}: {}",
                status.as_u16(),
                Self::error_message(response).await
            )));
        }

        let body: TokenResponseBody = response
            .json()
            .await
            .map_err(|e| ClientError::RefreshFailed(e.to_string()))?;
        Ok(IssuedToken {
            access_token: body.access_token,
            expires_in_sec: body.expires_in_sec,
        })
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let response = self.client.post(self.url("/logout")).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status().as_u16(),
                message: Self::error_message(response).await,
            });
        }
        Ok(())
    }

    async fn call(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<Value, ClientError> {
        let method: reqwest::Method = method
            .parse()
            .map_err(|_| ClientError::Transport(format!("invalid method: {method}")))?;

        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        response.json().await.map_err(ClientError::from)
    }
}
