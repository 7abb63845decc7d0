//! sessiond
//!
//! An axum service fronting the cookie-carried JWT session layer:
//!
//! - **Session resolution**: every request, WebSocket handshakes included,
//!   is checked for a session cookie before it reaches a handler
//! - **Cookie conversion**: callers authenticated upstream exchange that
//!   identity for a session cookie, and refresh it later
//! - **Logout**: clears the session cookie

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod upstream;
pub mod users;
pub mod ws;
