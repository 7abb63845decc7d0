//! Converting an authenticated caller into a JWT session cookie.
//!
//! Unlike the resolver middleware this endpoint answers with a definitive
//! status. It never authenticates anyone itself: the caller must already
//! carry a [`Ctx`], from a session cookie or from an upstream login.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower_cookies::{Cookie, Cookies};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::cookie::SessionCookie;
use crate::ctx::{Ctx, resolver::cookie_header};
use crate::identity::AuthenticatedIdentity;
use crate::issuer::IssueOptions;
use crate::metrics::{IssueReason, report_jwt_cookie_issued};
use crate::prelude::*;
use crate::state::SessionState;
use crate::verifier::VerificationOutcome;

pub const NO_VALID_SESSION: &str = "User has no valid session.";
pub const NEW_COOKIE_ISSUED: &str = "New JWT cookie issued.";
pub const REFRESHED_COOKIE_ISSUED: &str = "Refreshed JWT cookie issued.";
pub const ALREADY_VALID: &str = "User session already has a valid JWT session.";
pub const INVALID_SESSION: &str = "JWT Session is invalid";

/// What the conversion endpoint decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// No caller identity; nothing was verified.
    Unauthenticated,
    Issued(SessionCookie),
    Refreshed(SessionCookie),
    AlreadyValid,
    InvalidSession,
}

impl ConversionOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::Issued(_) | Self::Refreshed(_) | Self::AlreadyValid => StatusCode::OK,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => NO_VALID_SESSION,
            Self::Issued(_) => NEW_COOKIE_ISSUED,
            Self::Refreshed(_) => REFRESHED_COOKIE_ISSUED,
            Self::AlreadyValid => ALREADY_VALID,
            Self::InvalidSession => INVALID_SESSION,
        }
    }

    /// The cookie to set, for outcomes that issued one.
    pub fn cookie(&self) -> Option<&SessionCookie> {
        match self {
            Self::Issued(cookie) | Self::Refreshed(cookie) => Some(cookie),
            _ => None,
        }
    }
}

/// Decides the conversion for `caller` presenting `cookie_header` at `now_millis`.
///
/// Issues at most one cookie, always for the caller rather than for the
/// subject of whatever token was presented. Each issued cookie is counted in
/// `jwt_cookie_issued_total`.
///
/// # Arguments
///
/// * `state` - Session configuration, issuer and verifier
/// * `caller` - Identity already established for the request, if any
/// * `cookie_header` - The request's `Cookie` header, `""` when absent
/// * `now_millis` - Current time in epoch milliseconds, used for staleness
///
/// # Returns
///
/// * `Ok(ConversionOutcome)` - Status, message and optional cookie to send
/// * `Err(Error)` - Signing a new token failed
///
/// # Example
///
/// ```rust,no_run
/// use session_web::convert::{ConversionOutcome, convert};
/// use session_web::state::SessionState;
///
/// # async fn example(state: &SessionState) -> session_web::prelude::Result<()> {
/// let outcome = convert(state, None, "", chrono::Utc::now().timestamp_millis()).await?;
/// assert_eq!(outcome, ConversionOutcome::Unauthenticated);
/// # Ok(())
/// # }
/// ```
pub async fn convert(
    state: &SessionState,
    caller: Option<&AuthenticatedIdentity>,
    cookie_header: &str,
    now_millis: i64,
) -> Result<ConversionOutcome> {
    let Some(caller) = caller else {
        return Ok(ConversionOutcome::Unauthenticated);
    };

    match state.verifier.verify(cookie_header).await {
        VerificationOutcome::NoCookie => {
            let cookie = state
                .issuer
                .issue(&caller.user_id, IssueOptions::default())
                .await?;
            report_jwt_cookie_issued(IssueReason::New);
            info!(user_id = %caller.user_id, "Issued new JWT session cookie");
            Ok(ConversionOutcome::Issued(cookie))
        }
        VerificationOutcome::Valid(claims) if state.verifier.is_stale(&claims, now_millis) => {
            let cookie = state
                .issuer
                .issue(&caller.user_id, IssueOptions::default())
                .await?;
            report_jwt_cookie_issued(IssueReason::Refresh);
            info!(user_id = %caller.user_id, "Refreshed JWT session cookie");
            Ok(ConversionOutcome::Refreshed(cookie))
        }
        VerificationOutcome::Valid(_) => Ok(ConversionOutcome::AlreadyValid),
        VerificationOutcome::Invalid(err) => {
            warn!(user_id = %caller.user_id, "JWT session presented for conversion is invalid: {err}");
            Ok(ConversionOutcome::InvalidSession)
        }
    }
}

/// Handler issuing, refreshing or confirming the caller's session cookie.
pub async fn jwt_session_convertor(
    State(state): State<SessionState>,
    ctx: Option<Ctx>,
    cookies: Cookies,
    headers: HeaderMap,
) -> Result<Response> {
    let outcome = convert(
        &state,
        ctx.as_ref().map(|ctx| &ctx.identity),
        &cookie_header(&headers),
        Utc::now().timestamp_millis(),
    )
    .await?;

    if let Some(cookie) = outcome.cookie() {
        cookies.add(cookie.to_cookie());
    }
    Ok((outcome.status(), outcome.message()).into_response())
}

/// Removes the session cookie from the client.
pub fn clear_session(cookies: &Cookies, config: &SessionConfig) {
    let mut cookie = Cookie::new(config.cookie_name.clone(), "");
    if let Some(path) = &config.cookie.path {
        cookie.set_path(path.clone());
    }
    cookies.remove(cookie);
}
