//! # authgate-client
//!
//! Consumer-side token handling for AuthGate: the in-memory token cache,
//! the single-flight refresh coordinator, and the authenticated call
//! wrapper that retries a protected call exactly once after a 401.
//!
//! ## Modules
//!
//! - `token_cache` — current access token, expiry estimate, version counter,
//!   change listeners
//! - `single_flight` — at-most-one-concurrent-execution primitive
//! - `coordinator` — refresh deduplication over the single-flight slot
//! - `transport` — the `AuthTransport` seam and its reqwest implementation
//! - `client` — `AuthClient`, the authenticated call wrapper

pub mod client;
pub mod coordinator;
pub mod error;
pub mod single_flight;
pub mod token_cache;
pub mod transport;

pub use client::AuthClient;
pub use coordinator::RefreshCoordinator;
pub use error::ClientError;
pub use single_flight::SingleFlight;
pub use token_cache::{ChangeCause, TokenCache, TokenChange};
pub use transport::{AuthTransport, HttpTransport, IssuedToken};
