//! Error types for sessiond.
//!
//! Startup and serving failures. Per-request failures are handled by the
//! session layer and never reach this type.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Auth(#[from] session_auth::error::Error),

    #[error(transparent)]
    InvalidHeaderName(#[from] axum::http::header::InvalidHeaderName),

    #[error("JWT_SECRET must be set")]
    MissingSecret,
}
