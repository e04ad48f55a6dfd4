use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `ivr auth login`")]
    NotAuthenticated,

    #[error("admin credentials required; run `ivr auth login --admin`")]
    AdminRequired,

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Other(String),
}
