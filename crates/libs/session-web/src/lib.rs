//! Cookie-carried JWT sessions for axum services.
//!
//! Every request first passes through [`ctx::resolver::mw_session_resolver`],
//! which attaches a [`ctx::Ctx`] when the session cookie verifies and the
//! user still exists, and otherwise lets the request through untouched.
//! [`convert::jwt_session_convertor`] is the explicit endpoint that turns an
//! identity established elsewhere into a session cookie and keeps it fresh.

pub mod config;
pub mod convert;
pub mod cookie;
pub mod ctx;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod metrics;
pub mod mw_auth;
pub mod prelude;
pub mod state;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_support;
