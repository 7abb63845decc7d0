//! Context resolver for extracting the session identity from requests.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::ctx::Ctx;
use crate::identity::{AuthenticatedIdentity, IdentityStore};
use crate::prelude::*;
use crate::state::SessionState;
use crate::verifier::{SessionVerifier, VerificationOutcome};

/// Resolves session cookies to identities, best effort.
#[derive(Clone)]
pub struct SessionAuthenticator {
    verifier: SessionVerifier,
    users: Arc<dyn IdentityStore>,
}

impl SessionAuthenticator {
    pub fn new(verifier: SessionVerifier, users: Arc<dyn IdentityStore>) -> Self {
        Self { verifier, users }
    }

    /// The identity behind `cookie_header`, if it can be established.
    ///
    /// Never fails: an invalid token, an unknown user or a store error all
    /// leave the caller unauthenticated and are only logged.
    pub async fn authenticate(&self, cookie_header: &str) -> Option<AuthenticatedIdentity> {
        match self.resolve(cookie_header).await {
            Ok(identity) => identity,
            Err(err @ Error::IdentityNotFound(_)) => {
                debug!("JWT session does not resolve to a user: {err}");
                None
            }
            Err(err) => {
                warn!("Failed to authenticate user with JWT Session: {err}");
                None
            }
        }
    }

    async fn resolve(&self, cookie_header: &str) -> Result<Option<AuthenticatedIdentity>> {
        let claims = match self.verifier.verify(cookie_header).await {
            VerificationOutcome::NoCookie => return Ok(None),
            VerificationOutcome::Invalid(err) => return Err(err),
            VerificationOutcome::Valid(claims) => claims,
        };

        let user = self
            .users
            .find_user_by_id(&claims.subject, &claims.subject)
            .await?
            .ok_or(Error::IdentityNotFound(claims.subject))?;
        Ok(Some(user.into()))
    }
}

/// All `Cookie` headers of a request joined into one header value.
pub fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Middleware attaching the session identity to the request.
///
/// Runs in front of every route, HTTP and WebSocket handshakes alike, and
/// always hands the request on: routes that need an identity enforce it
/// themselves.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, middleware, routing::get};
/// use session_web::ctx::resolver::mw_session_resolver;
/// use session_web::state::SessionState;
///
/// fn app(state: SessionState) -> Router {
///     Router::new()
///         .route("/", get(|| async { "hello" }))
///         .layer(middleware::from_fn_with_state(state, mw_session_resolver))
/// }
/// ```
#[axum::debug_middleware]
pub async fn mw_session_resolver(
    State(state): State<SessionState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = cookie_header(req.headers());
    if let Some(identity) = state.authenticator.authenticate(&header).await {
        req.extensions_mut().insert(Ctx::from_session(identity));
    }

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts.extensions.get::<Ctx>().cloned().ok_or(Error::CtxMissing)
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Ctx>().cloned())
    }
}
