//! Refresh coordination: at most one refresh in flight system-wide.
//!
//! All concurrent refresh triggers join the same in-flight operation and
//! receive its result. On success the token cache is updated with
//! cause=refresh before waiters resolve; on a terminal rejection the cache
//! is cleared since the user must log in again.

use std::sync::Arc;

use futures::FutureExt;
use tracing::debug;

use crate::error::ClientError;
use crate::single_flight::SingleFlight;
use crate::token_cache::{ChangeCause, TokenCache};
use crate::transport::{AuthTransport, IssuedToken};

/// Deduplicates concurrent refresh attempts into a single operation.
pub struct RefreshCoordinator<T: AuthTransport + ?Sized> {
    cache: Arc<TokenCache>,
    transport: Arc<T>,
    flight: SingleFlight<IssuedToken, ClientError>,
}

impl<T: AuthTransport + ?Sized + 'static> RefreshCoordinator<T> {
    /// Creates a coordinator over the given cache and transport.
    pub fn new(cache: Arc<TokenCache>, transport: Arc<T>) -> Self {
        Self {
            cache,
            transport,
            flight: SingleFlight::new(),
        }
    }

    /// Joins the in-flight refresh if one exists, otherwise starts one.
    ///
    /// No timeout is imposed; a stalled transport blocks every joined
    /// waiter until it settles.
    pub async fn trigger_refresh(&self) -> Result<IssuedToken, ClientError> {
        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.cache);

        let result = self
            .flight
            .run(move || {
                async move {
                    debug!("Starting refresh");
                    let issued = transport.refresh().await?;
                    cache.set(
                        issued.access_token.clone(),
                        issued.expires_in_sec,
                        ChangeCause::Refresh,
                    );
                    Ok(issued)
                }
                .boxed()
            })
            .await;

        if matches!(result, Err(ClientError::RefreshRejected(_))) {
            // Re-login required; stale token must not be reused.
            self.cache.clear();
        }

        result
    }
}

impl<T: AuthTransport + ?Sized> std::fmt::Debug for RefreshCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("flight", &self.flight)
            .finish()
    }
}
