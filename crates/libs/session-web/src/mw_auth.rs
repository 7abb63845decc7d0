//! Authentication middleware for protecting routes.
//!
//! The session resolver never rejects a request; routes that cannot serve
//! anonymous callers add this guard on top of it.

use crate::prelude::*;
use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;

/// Middleware that requires an authenticated caller for a route.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, middleware, routing::get};
/// use session_web::mw_auth::mw_require_auth;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn(mw_require_auth));
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
