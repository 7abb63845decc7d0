//! HS256 JSON Web Token implementation of [`TokenService`].
//!
//! Tokens carry the standard `sub`, `iat`, `exp`, `iss` and `jti` claims plus
//! whatever extra claims the caller supplies. Expiry is always computed from
//! the issued-at time, so a token signed with an overridden `iat` expires
//! `ttl` seconds after that instant rather than after "now".
//!
//! # Examples
//!
//! ```rust
//! use session_auth::jwt::JwtTokenService;
//! use session_auth::token::{ExtraClaims, TokenService};
//!
//! # async fn example() -> session_auth::prelude::Result<()> {
//! let tokens = JwtTokenService::new(b"MySuperSecret", 3600)?;
//! let token = tokens.sign("user-1", ExtraClaims::new(), None).await?;
//!
//! let claims = tokens.verify(&token).await?;
//! assert_eq!(claims.subject.as_deref(), Some("user-1"));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::ISS;
use crate::prelude::*;
use crate::token::{ExtraClaims, TokenClaims, TokenService};

/// JWT signing algorithm used for session tokens.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Cryptographic key pair for JWT signing and verification.
struct Keys {
    /// Key used for signing new JWT tokens.
    encoding: EncodingKey,
    /// Key used for verifying existing JWT tokens.
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// The subset of the payload the session layer reads back.
#[derive(Debug, Deserialize)]
struct SessionToken {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Signs and verifies session tokens with a shared secret.
pub struct JwtTokenService {
    keys: Keys,
    issuer: String,
    default_ttl_seconds: u64,
}

impl JwtTokenService {
    /// Creates a service signing with `secret`.
    ///
    /// Tokens signed without an explicit TTL live for `default_ttl_seconds`.
    pub fn new(secret: &[u8], default_ttl_seconds: u64) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }
        Ok(Self {
            keys: Keys::new(secret),
            issuer: String::from(ISS),
            default_ttl_seconds,
        })
    }

    /// Overrides the `iss` claim stamped on and required from tokens.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&self.issuer]);
        validation
    }
}

#[async_trait]
impl TokenService for JwtTokenService {
    async fn sign(
        &self,
        subject: &str,
        extra_claims: ExtraClaims,
        ttl_seconds: Option<u64>,
    ) -> Result<String> {
        let mut payload = extra_claims;

        let issued_at = match payload.get("iat") {
            Some(iat) => iat.as_i64().ok_or(Error::InvalidClaim("iat"))?,
            None => Utc::now().timestamp(),
        };
        let ttl = i64::try_from(ttl_seconds.unwrap_or(self.default_ttl_seconds))
            .map_err(|_| Error::InvalidClaim("exp"))?;
        let expires_at = issued_at
            .checked_add(ttl)
            .ok_or(Error::InvalidClaim("exp"))?;

        payload.insert("sub".into(), json!(subject));
        payload.insert("iat".into(), json!(issued_at));
        payload.insert("exp".into(), json!(expires_at));
        payload.insert("iss".into(), json!(self.issuer));
        payload.insert("jti".into(), json!(Uuid::new_v4()));

        Ok(encode(&Header::new(ALGORITHM), &payload, &self.keys.encoding)?)
    }

    async fn verify(&self, token: &str) -> Result<TokenClaims> {
        let data = decode::<SessionToken>(token, &self.keys.decoding, &self.validation())
            .map_err(|err| {
                debug!("Failed to decode jwt token {err}");
                match err.kind() {
                    ErrorKind::ExpiredSignature => Error::TokenExpired,
                    _ => Error::InvalidToken(err),
                }
            })?;

        Ok(TokenClaims {
            subject: data.claims.sub,
            issued_at_seconds: data.claims.iat.unwrap_or(0),
            expires_at_seconds: data.claims.exp,
        })
    }
}
