//! # authgate-auth
//!
//! Token issuing, verification, and refresh session tracking for AuthGate.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation for access and refresh tokens
//! - `session` — server-side refresh session registry and the issuing authority

pub mod jwt;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenType};
pub use session::{RefreshSession, SessionManager, SessionStore};
