//! Creating session cookies.

use std::sync::Arc;

use serde_json::json;
use session_auth::token::{ExtraClaims, TokenService};

use crate::config::SessionConfig;
use crate::cookie::SessionCookie;
use crate::prelude::*;

/// Overrides for [`SessionIssuer::issue`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IssueOptions {
    /// Backdates the token. Truncated to whole seconds.
    pub issued_at_millis: Option<i64>,
    pub ttl_seconds: Option<u64>,
}

/// Signs session tokens and wraps them in the configured cookie.
#[derive(Clone)]
pub struct SessionIssuer {
    config: Arc<SessionConfig>,
    tokens: Arc<dyn TokenService>,
}

impl SessionIssuer {
    pub fn new(config: Arc<SessionConfig>, tokens: Arc<dyn TokenService>) -> Self {
        Self { config, tokens }
    }

    /// Issues a session cookie for `user_id`.
    ///
    /// The cookie attributes, `Max-Age` included, are the configured ones; the
    /// token itself is only valid for the token TTL.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Subject of the signed token
    /// * `options` - Issued-at and TTL overrides, see [`IssueOptions`]
    ///
    /// # Returns
    ///
    /// * `Ok(SessionCookie)` - The configured cookie carrying the new token
    /// * `Err(Error)` - The token service failed to sign
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use session_auth::jwt::JwtTokenService;
    /// use session_web::config::SessionConfig;
    /// use session_web::issuer::{IssueOptions, SessionIssuer};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let tokens = Arc::new(JwtTokenService::new(b"MySuperSecret", 3600)?);
    /// let issuer = SessionIssuer::new(Arc::new(SessionConfig::default()), tokens);
    ///
    /// let cookie = issuer.issue("user-1", IssueOptions::default()).await?;
    /// assert_eq!(cookie.name(), "_session_jwt");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn issue(&self, user_id: &str, options: IssueOptions) -> Result<SessionCookie> {
        let mut claims = ExtraClaims::new();
        if let Some(issued_at_millis) = options.issued_at_millis {
            claims.insert("iat".into(), json!(issued_at_millis.div_euclid(1000)));
        }
        let ttl_seconds = options.ttl_seconds.or(self.config.token_ttl_seconds);

        let token = self.tokens.sign(user_id, claims, ttl_seconds).await?;

        Ok(SessionCookie::new(
            self.config.cookie_name.clone(),
            token,
            self.config.cookie.clone(),
        ))
    }
}
