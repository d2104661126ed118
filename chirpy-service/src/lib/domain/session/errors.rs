use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error type for login, refresh and revoke operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token revoked")]
    RefreshTokenRevoked,

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error(transparent)]
    User(#[from] UserError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
