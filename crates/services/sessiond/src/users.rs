//! Identity store backed by the `[[users]]` configuration table.

use std::collections::HashMap;

use async_trait::async_trait;
use session_web::identity::{IdentityStore, User};
use session_web::prelude::Result as WebResult;
use tracing::trace;

/// Read-only user directory built at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityStore {
    users: HashMap<String, User>,
}

impl StaticIdentityStore {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityStore for StaticIdentityStore {
    async fn find_user_by_id(&self, id: &str, acting_as: &str) -> WebResult<Option<User>> {
        trace!(id, acting_as, "Looking up user");
        Ok(self.users.get(id).cloned())
    }
}
