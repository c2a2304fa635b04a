//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedAccess, IssuedRefresh, JwtEncoder};
