//! Reading the `Cookie` request header and writing session cookies.

use std::collections::HashMap;

use tower_cookies::Cookie;
use tower_cookies::cookie::{SameSite as CookieSameSite, time::Duration};

use crate::config::{CookieAttributes, SameSite};

/// Cookie name to value. An entry without `=` maps to `None`.
pub type CookieMap = HashMap<String, Option<String>>;

/// Parses a raw `Cookie` header value.
///
/// Entries are separated by `"; "` and split on their first `=`. Later
/// duplicates overwrite earlier ones.
///
/// # Examples
///
/// ```rust
/// use session_web::cookie::parse;
///
/// let cookies = parse("theme=dark; flag; theme=light");
/// assert_eq!(cookies["theme"].as_deref(), Some("light"));
/// assert_eq!(cookies["flag"], None);
/// ```
pub fn parse(header: &str) -> CookieMap {
    let mut cookies = CookieMap::new();
    for entry in header.split("; ").filter(|entry| !entry.is_empty()) {
        match entry.split_once('=') {
            Some((name, value)) => cookies.insert(name.to_string(), Some(value.to_string())),
            None => cookies.insert(entry.to_string(), None),
        };
    }
    cookies
}

/// Builds a `Set-Cookie` directive.
///
/// `Max-Age` is written in seconds, exactly as configured. This is the
/// rendering of [`to_cookie`], so it is also what goes out on the wire.
pub fn build(name: &str, value: &str, attributes: &CookieAttributes) -> String {
    to_cookie(name, value, attributes).to_string()
}

/// The cookie described by `attributes`, ready for the `CookieManagerLayer`.
///
/// `HttpOnly` and `Secure` are always set explicitly, so the cookie crate
/// never adds `Secure` on its own to a `SameSite=None` cookie.
pub fn to_cookie(name: &str, value: &str, attributes: &CookieAttributes) -> Cookie<'static> {
    let mut cookie = Cookie::build((name.to_string(), value.to_string()))
        .http_only(attributes.http_only)
        .secure(attributes.secure);
    if let Some(max_age) = attributes.max_age_seconds {
        cookie = cookie.max_age(Duration::seconds(max_age));
    }
    if let Some(same_site) = attributes.same_site {
        cookie = cookie.same_site(match same_site {
            SameSite::Strict => CookieSameSite::Strict,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::None => CookieSameSite::None,
        });
    }
    if let Some(path) = &attributes.path {
        cookie = cookie.path(path.clone());
    }
    cookie.build()
}

/// A freshly issued session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    value: String,
    attributes: CookieAttributes,
}

impl SessionCookie {
    pub fn new(name: String, value: String, attributes: CookieAttributes) -> Self {
        Self {
            name,
            value,
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The signed session token.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &CookieAttributes {
        &self.attributes
    }

    /// The `Set-Cookie` header value for this cookie.
    pub fn to_header_value(&self) -> String {
        build(&self.name, &self.value, &self.attributes)
    }

    /// Converts into a cookie the `CookieManagerLayer` can write to a response.
    pub fn to_cookie(&self) -> Cookie<'static> {
        to_cookie(&self.name, &self.value, &self.attributes)
    }
}
