//! Session cookie configuration.
//!
//! Loaded once at startup and shared read-only behind an `Arc`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "_session_jwt";
/// Tokens older than this are proactively replaced by the conversion endpoint.
pub const DEFAULT_REFRESH_THRESHOLD_MILLIS: i64 = 60 * 60 * 1000;
/// Default cookie lifetime, one week.
pub const DEFAULT_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// The `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes written alongside the session cookie.
///
/// `None` and `false` attributes are omitted from the `Set-Cookie` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieAttributes {
    /// `Max-Age`, in seconds.
    pub max_age_seconds: Option<i64>,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
    pub secure: bool,
    pub path: Option<String>,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            max_age_seconds: Some(DEFAULT_MAX_AGE_SECONDS),
            http_only: true,
            same_site: Some(SameSite::Lax),
            secure: true,
            path: Some(String::from("/")),
        }
    }
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The only cookie name recognised as a session.
    pub cookie_name: String,
    pub cookie: CookieAttributes,
    pub refresh_threshold_millis: i64,
    /// Token lifetime; the token service default applies when unset.
    pub token_ttl_seconds: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from(DEFAULT_COOKIE_NAME),
            cookie: CookieAttributes::default(),
            refresh_threshold_millis: DEFAULT_REFRESH_THRESHOLD_MILLIS,
            token_ttl_seconds: None,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }
    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }
}
