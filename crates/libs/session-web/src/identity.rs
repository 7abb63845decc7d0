//! The identity store seam and the identity attached to requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A user known to the identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The identity a verified session cookie resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub user_id: String,
}

impl From<User> for AuthenticatedIdentity {
    fn from(user: User) -> Self {
        Self { user_id: user.id }
    }
}

/// Looks users up by id.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Finds `id` on behalf of `acting_as`.
    ///
    /// Session resolution always looks a user up as themselves.
    async fn find_user_by_id(&self, id: &str, acting_as: &str) -> Result<Option<User>>;
}
