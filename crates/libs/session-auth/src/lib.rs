//! Token signing and verification for cookie-carried sessions.
//!
//! The session layer only ever talks to a [`token::TokenService`]; the
//! [`jwt::JwtTokenService`] is the HS256 implementation used by `sessiond`.

pub mod error;
pub mod jwt;
pub mod prelude;
pub mod token;

/// Default `iss` claim stamped on every session token.
pub const ISS: &str = "sessiond";
