//! Service configuration loaded from TOML.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use session_web::{config::SessionConfig, identity::User};

use crate::prelude::*;

/// Fallback token lifetime when neither a TTL nor a cookie max age is set.
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Top-level sessiond configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessiondConfig {
    pub listen_addr: SocketAddr,
    pub session: SessionConfig,
    /// Request header set by a trusted authentication proxy, e.g.
    /// `X-Forwarded-User`. Leave unset unless such a proxy strips client
    /// supplied values.
    pub trusted_identity_header: Option<String>,
    /// Users known to the built-in identity store.
    pub users: Vec<User>,
}

impl Default for SessiondConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session: SessionConfig::default(),
            trusted_identity_header: None,
            users: Vec::new(),
        }
    }
}

impl SessiondConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }
    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }

    /// Lifetime of signed tokens: the explicit TTL, else the cookie max age.
    pub fn token_ttl_seconds(&self) -> u64 {
        self.session
            .token_ttl_seconds
            .or_else(|| {
                self.session
                    .cookie
                    .max_age_seconds
                    .and_then(|max_age| u64::try_from(max_age).ok())
            })
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS)
    }
}
