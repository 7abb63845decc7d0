#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Invalid Token: {0}")]
    InvalidToken(jsonwebtoken::errors::Error),
    #[error("Token Expired")]
    TokenExpired,
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid claim '{0}'")]
    InvalidClaim(&'static str),
    #[error("Signing secret must not be empty")]
    EmptySecret,
}
