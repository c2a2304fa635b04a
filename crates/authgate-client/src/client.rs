//! Authenticated call wrapper.
//!
//! Performs a protected call with the cached access token attached. On a
//! 401 it consults the cache version recorded before the call: if another
//! caller already refreshed in the meantime, the refresh is skipped and the
//! call retried directly with the now-current token. Exactly one retry,
//! ever.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::coordinator::RefreshCoordinator;
use crate::error::ClientError;
use crate::token_cache::{ChangeCause, TokenCache};
use crate::transport::{AuthTransport, HttpTransport, IssuedToken};

/// Consumer-side entry point: login, logout, and protected calls with
/// automatic single-retry refresh.
pub struct AuthClient<T: AuthTransport + ?Sized> {
    cache: Arc<TokenCache>,
    transport: Arc<T>,
    coordinator: RefreshCoordinator<T>,
}

impl AuthClient<HttpTransport> {
    /// Creates a client talking to the given server base URL.
    pub fn connect(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(HttpTransport::new(base_url)?)))
    }
}

impl<T: AuthTransport + ?Sized + 'static> AuthClient<T> {
    /// Creates a client over the given transport with a fresh cache.
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_cache(transport, Arc::new(TokenCache::new()))
    }

    /// Creates a client over an injected cache, shared with other
    /// observers.
    pub fn with_cache(transport: Arc<T>, cache: Arc<TokenCache>) -> Self {
        let coordinator = RefreshCoordinator::new(Arc::clone(&cache), Arc::clone(&transport));
        Self {
            cache,
            transport,
            coordinator,
        }
    }

    /// The token cache, for subscriptions and inspection.
    pub fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    /// Logs in and stores the received token with cause=login.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, ClientError> {
        let issued = self.transport.login(username, password).await?;
        self.cache.set(
            issued.access_token.clone(),
            issued.expires_in_sec,
            ChangeCause::Login,
        );
        Ok(issued)
    }

    /// Attempts a session restore by refreshing from the stored cookie.
    pub async fn restore_session(&self) -> Result<IssuedToken, ClientError> {
        self.coordinator.trigger_refresh().await
    }

    /// Logs out and clears the cache. Server-side errors are swallowed:
    /// logout appears to succeed regardless.
    pub async fn logout(&self) {
        if let Err(e) = self.transport.logout().await {
            debug!(error = %e, "Ignoring logout transport error");
        }
        self.cache.clear();
    }

    /// Performs a protected call with single-retry refresh semantics.
    ///
    /// 1. Record the cache version `v0`.
    /// 2. Attempt with the current token; anything but a 401 passes through.
    /// 3. On a 401: refresh only if the version is still `v0` (someone else
    ///    may already have refreshed while this call was in the air).
    /// 4. Retry exactly once with the now-current token.
    pub async fn call_protected(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let version_at_start = self.cache.version();
        let token = self.cache.current();

        let first_error = match self
            .transport
            .call(method, path, body.clone(), token.as_deref())
            .await
        {
            Err(ClientError::Unauthorized(message)) => message,
            other => return other,
        };

        if self.cache.version() == version_at_start {
            debug!(error = %first_error, "Call unauthorized, refreshing");
            self.coordinator.trigger_refresh().await?;
        } else {
            debug!("Call unauthorized, but token already refreshed concurrently");
        }

        let token = self.cache.current();
        self.transport
            .call(method, path, body, token.as_deref())
            .await
    }

    /// GET /me convenience wrapper.
    pub async fn me(&self) -> Result<Value, ClientError> {
        self.call_protected("GET", "/me", None).await
    }
}

impl<T: AuthTransport + ?Sized> std::fmt::Debug for AuthClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("cache", &self.cache)
            .finish()
    }
}
