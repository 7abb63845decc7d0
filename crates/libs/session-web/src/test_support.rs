//! Fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use session_auth::jwt::JwtTokenService;
use session_auth::token::TokenService;

use crate::config::SessionConfig;
use crate::identity::{IdentityStore, User};
use crate::prelude::*;
use crate::state::SessionState;

pub(crate) const SECRET: &[u8] = b"session-web-test-secret";

pub(crate) fn config() -> Arc<SessionConfig> {
    Arc::new(SessionConfig {
        cookie_name: "session".into(),
        ..SessionConfig::default()
    })
}

pub(crate) fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(SECRET, 86400).expect("non-empty secret"))
}

pub(crate) fn state(users: MemoryIdentityStore) -> SessionState {
    SessionState::new(config().as_ref().clone(), token_service(), Arc::new(users))
}

/// In-memory identity store recording every lookup.
#[derive(Default, Clone)]
pub(crate) struct MemoryIdentityStore {
    users: HashMap<String, User>,
    failing: bool,
    lookups: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryIdentityStore {
    pub(crate) fn with_users<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let users = ids
            .into_iter()
            .map(|id| {
                (
                    id.to_string(),
                    User {
                        id: id.to_string(),
                        name: None,
                    },
                )
            })
            .collect();
        Self {
            users,
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(crate) fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().expect("lookups lock").clone()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_user_by_id(&self, id: &str, acting_as: &str) -> Result<Option<User>> {
        self.lookups
            .lock()
            .expect("lookups lock")
            .push((id.to_string(), acting_as.to_string()));
        if self.failing {
            return Err(Error::IdentityStore("store offline".into()));
        }
        Ok(self.users.get(id).cloned())
    }
}
