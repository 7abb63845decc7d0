//! Shared session components handed to middleware and handlers.

use std::sync::Arc;

use session_auth::token::TokenService;

use crate::config::SessionConfig;
use crate::ctx::resolver::SessionAuthenticator;
use crate::identity::IdentityStore;
use crate::issuer::SessionIssuer;
use crate::verifier::SessionVerifier;

/// Read-only session machinery, cheap to clone into every request.
#[derive(Clone)]
pub struct SessionState {
    pub config: Arc<SessionConfig>,
    pub issuer: SessionIssuer,
    pub verifier: SessionVerifier,
    pub authenticator: SessionAuthenticator,
}

impl SessionState {
    pub fn new(
        config: SessionConfig,
        tokens: Arc<dyn TokenService>,
        users: Arc<dyn IdentityStore>,
    ) -> Self {
        let config = Arc::new(config);
        let verifier = SessionVerifier::new(config.clone(), tokens.clone());
        Self {
            issuer: SessionIssuer::new(config.clone(), tokens),
            authenticator: SessionAuthenticator::new(verifier.clone(), users),
            verifier,
            config,
        }
    }
}
