//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Auth(#[from] session_auth::error::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    /* Session Errors */
    #[error("Subject is missing from JWT session claims")]
    MissingSubject,

    #[error("No user found for session subject {0}")]
    IdentityNotFound(String),

    #[error("Identity store failure: {0}")]
    IdentityStore(String),

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    /// Whether the error means the presented session token cannot be trusted.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            Error::MissingSubject
                | Error::Auth(
                    session_auth::error::Error::InvalidToken(_)
                        | session_auth::error::Error::TokenExpired
                        | session_auth::error::Error::InvalidClaim(_)
                )
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            Error::CtxMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),
            err if err.is_invalid_token() => {
                (StatusCode::UNAUTHORIZED, "Invalid authentication token")
            }
            Error::IdentityNotFound(_) => (StatusCode::UNAUTHORIZED, "Authentication required"),

            // Internal errors - hide details
            _ => {
                error!("Creating API error response for error: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
