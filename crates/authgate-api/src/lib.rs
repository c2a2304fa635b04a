//! # authgate-api
//!
//! HTTP API layer for AuthGate. Routes, handlers, DTOs, the `AuthUser`
//! extractor, refresh cookie handling, and the `ApiError` response mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
