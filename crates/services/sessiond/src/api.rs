//! HTTP routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderName, StatusCode},
    middleware,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use session_auth::token::TokenService;
use session_web::{
    convert::{clear_session, jwt_session_convertor},
    ctx::{Ctx, CtxSource, resolver::mw_session_resolver},
    identity::IdentityStore,
    mw_auth::mw_require_auth,
    state::SessionState,
};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::config::SessiondConfig;
use crate::prelude::*;
use crate::upstream::{UpstreamIdentity, mw_upstream_identity};
use crate::ws::ws_handler;

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

/// Body of `GET /v1/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Me {
    pub user_id: String,
    pub source: CtxSource,
}

/// Builds the application router.
///
/// Layers run outside-in: cookie manager, session resolver, then the
/// optional upstream identity bridge.
pub fn router(
    config: &SessiondConfig,
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn IdentityStore>,
) -> Result<Router> {
    let state = SessionState::new(config.session.clone(), tokens, users);

    let protected_routes = Router::new()
        .route(&v1("me"), get(me))
        .route_layer(middleware::from_fn(mw_require_auth));

    let mut app = Router::new()
        .route(&v1("health"), get(health))
        .route(
            &v1("auth/jwt-cookie"),
            get(jwt_session_convertor).post(jwt_session_convertor),
        )
        .route(&v1("auth/logout"), post(logout))
        .route(&v1("ws"), get(ws_handler))
        .merge(protected_routes);

    if let Some(header) = &config.trusted_identity_header {
        let upstream = UpstreamIdentity::new(HeaderName::try_from(header.as_str())?);
        app = app.layer(middleware::from_fn_with_state(
            Arc::new(upstream),
            mw_upstream_identity,
        ));
    }

    Ok(app
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_session_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .layer(
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()),
        )
        .with_state(state))
}

async fn health() -> &'static str {
    "ok"
}

async fn me(ctx: Ctx) -> Json<Me> {
    Json(Me {
        user_id: ctx.identity.user_id,
        source: ctx.source,
    })
}

async fn logout(State(state): State<SessionState>, cookies: Cookies) -> StatusCode {
    clear_session(&cookies, &state.config);
    StatusCode::NO_CONTENT
}
