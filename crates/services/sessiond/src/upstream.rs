//! Bridging an upstream authentication proxy into the request context.
//!
//! When sessiond sits behind a proxy that performs the primary login, the
//! proxy forwards the user id in a header. That identity is what the
//! conversion endpoint turns into a session cookie.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use session_web::ctx::{Ctx, CtxSource};
use tracing::debug;

/// The header a trusted proxy uses to name the authenticated user.
#[derive(Debug, Clone)]
pub struct UpstreamIdentity {
    header: HeaderName,
}

impl UpstreamIdentity {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }

    pub fn user_id<'a>(&self, req: &'a Request) -> Option<&'a str> {
        req.headers()
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Middleware attaching the upstream identity when no session identity exists.
pub async fn mw_upstream_identity(
    State(upstream): State<Arc<UpstreamIdentity>>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<Ctx>().is_none()
        && let Some(user_id) = upstream.user_id(&req).map(str::to_string)
    {
        debug!(%user_id, "Using upstream identity");
        req.extensions_mut()
            .insert(Ctx::new(user_id, CtxSource::Upstream));
    }
    next.run(req).await
}
