//! Request context management for web handlers.

use serde::{Deserialize, Serialize};

use crate::identity::AuthenticatedIdentity;

pub mod resolver;

/// Where the identity on a request came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CtxSource {
    /// A verified session cookie.
    SessionCookie,
    /// An authentication step in front of the session layer.
    Upstream,
}

/// Request context of an authenticated caller.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub identity: AuthenticatedIdentity,
    pub source: CtxSource,
}

impl Ctx {
    /// Creates a new request context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use session_web::ctx::{Ctx, CtxSource};
    ///
    /// let ctx = Ctx::new("u1", CtxSource::Upstream);
    /// assert_eq!(ctx.identity.user_id, "u1");
    /// ```
    pub fn new(user_id: impl Into<String>, source: CtxSource) -> Self {
        Self {
            identity: AuthenticatedIdentity {
                user_id: user_id.into(),
            },
            source,
        }
    }

    pub fn from_session(identity: AuthenticatedIdentity) -> Self {
        Self {
            identity,
            source: CtxSource::SessionCookie,
        }
    }
}
