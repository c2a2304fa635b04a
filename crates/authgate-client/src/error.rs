//! Client-side error taxonomy.
//!
//! `ClientError` is `Clone` because refresh results are distributed to all
//! waiters joined on the shared in-flight future; error payloads are
//! therefore plain strings rather than wrapped source errors.

use thiserror::Error;

/// Errors surfaced by the consumer-side auth stack.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Login rejected the supplied credentials. User-facing; no retry.
    #[error("bad credentials: {0}")]
    BadCredentials(String),

    /// A protected call was rejected (missing/invalid/expired access
    /// token). Triggers refresh-and-retry in the call wrapper.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The refresh token was missing, invalid, expired, or unregistered.
    /// Terminal: the user must log in again.
    #[error("refresh rejected: {0}")]
    RefreshRejected(String),

    /// Transport failure while refreshing. Terminal for the current call;
    /// the in-flight slot is cleared so a later attempt can retry.
    #[error("refresh failed: {0}")]
    RefreshFailed(String),

    /// A non-401 error status from the server, passed through untouched.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message.
        message: String,
    },

    /// Network or protocol failure outside of refresh.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
