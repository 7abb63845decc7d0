//! The token service seam.
//!
//! Everything above this module treats a session token as an opaque string:
//! it can only be produced by [`TokenService::sign`] and inspected through
//! [`TokenService::verify`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Additional claims merged into a signed token.
///
/// An `iat` entry overrides the issued-at time the service would otherwise
/// stamp; it must be a whole number of seconds.
pub type ExtraClaims = serde_json::Map<String, serde_json::Value>;

/// Claims recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The `sub` claim. Verification does not require it; callers decide.
    pub subject: Option<String>,
    /// The `iat` claim in whole seconds, `0` when the token carries none.
    pub issued_at_seconds: i64,
    /// The `exp` claim in whole seconds.
    pub expires_at_seconds: Option<i64>,
}

/// Signs and verifies session tokens.
///
/// Both operations may be backed by remote key material, so they are async.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Signs a token for `subject`, valid for `ttl_seconds` or the service default.
    async fn sign(
        &self,
        subject: &str,
        extra_claims: ExtraClaims,
        ttl_seconds: Option<u64>,
    ) -> Result<String>;

    /// Verifies signature, structure and expiry, returning the claims.
    async fn verify(&self, token: &str) -> Result<TokenClaims>;
}
