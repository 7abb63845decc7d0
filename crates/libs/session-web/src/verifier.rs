//! Deciding what the session cookie on a request is worth.

use std::sync::Arc;

use session_auth::token::TokenService;
use tracing::debug;

use crate::config::SessionConfig;
use crate::cookie::{self, CookieMap};
use crate::prelude::*;

/// Claims of a verified session token with a non-empty subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub subject: String,
    pub issued_at_seconds: i64,
    pub expires_at_seconds: Option<i64>,
}

impl SessionClaims {
    pub fn issued_at_millis(&self) -> i64 {
        self.issued_at_seconds.saturating_mul(1000)
    }
}

/// Result of inspecting a request's session cookie.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// No session cookie, or an empty one.
    NoCookie,
    Valid(SessionClaims),
    /// The cookie is present but cannot be trusted.
    Invalid(Error),
}

#[derive(Clone)]
pub struct SessionVerifier {
    config: Arc<SessionConfig>,
    tokens: Arc<dyn TokenService>,
}

impl SessionVerifier {
    pub fn new(config: Arc<SessionConfig>, tokens: Arc<dyn TokenService>) -> Self {
        Self { config, tokens }
    }

    /// The session token among `cookies`, if any.
    pub fn session_token<'a>(&self, cookies: &'a CookieMap) -> Option<&'a str> {
        cookies
            .get(&self.config.cookie_name)
            .and_then(|value| value.as_deref())
            .filter(|value| !value.is_empty())
    }

    /// Verifies the session cookie carried by a raw `Cookie` header.
    ///
    /// Only the configured cookie name is considered. A missing cookie and an
    /// empty value are both reported as [`VerificationOutcome::NoCookie`].
    ///
    /// # Arguments
    ///
    /// * `cookie_header` - The request's `Cookie` header, `""` when absent
    ///
    /// # Returns
    ///
    /// * `NoCookie` - No usable session cookie on the request
    /// * `Valid(claims)` - Signature, issuer and expiry check out and a subject is present
    /// * `Invalid(err)` - The token is malformed, forged, expired or has no subject
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use session_auth::jwt::JwtTokenService;
    /// use session_web::config::SessionConfig;
    /// use session_web::verifier::{SessionVerifier, VerificationOutcome};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let tokens = Arc::new(JwtTokenService::new(b"MySuperSecret", 3600)?);
    /// let verifier = SessionVerifier::new(Arc::new(SessionConfig::default()), tokens);
    ///
    /// let outcome = verifier.verify("theme=dark").await;
    /// assert!(matches!(outcome, VerificationOutcome::NoCookie));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn verify(&self, cookie_header: &str) -> VerificationOutcome {
        let cookies = cookie::parse(cookie_header);
        let Some(token) = self.session_token(&cookies) else {
            debug!("No JWT session present on request");
            return VerificationOutcome::NoCookie;
        };

        match self.verify_token(token).await {
            Ok(claims) => VerificationOutcome::Valid(claims),
            Err(err) => VerificationOutcome::Invalid(err),
        }
    }

    async fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        let claims = self.tokens.verify(token).await?;
        let subject = claims
            .subject
            .filter(|subject| !subject.is_empty())
            .ok_or(Error::MissingSubject)?;
        debug!(%subject, iat = claims.issued_at_seconds, "JWT session token verified");

        Ok(SessionClaims {
            subject,
            issued_at_seconds: claims.issued_at_seconds,
            expires_at_seconds: claims.expires_at_seconds,
        })
    }

    /// Whether a valid token is old enough to be replaced.
    ///
    /// Expiry is the token service's business; this is only the refresh
    /// window. A token exactly at the threshold is still fresh.
    pub fn is_stale(&self, claims: &SessionClaims, now_millis: i64) -> bool {
        claims
            .issued_at_millis()
            .saturating_add(self.config.refresh_threshold_millis)
            < now_millis
    }
}
