use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::models::Session;

/// Port for session (login and token lifecycle) operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Check credentials and open a session.
    ///
    /// # Returns
    /// User, signed access token and a newly persisted refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Access token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token is unknown
    /// * `RefreshTokenExpired` - Token is past its expiry
    /// * `RefreshTokenRevoked` - Token was revoked
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token is unknown
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// # Returns
    /// Optional refresh token (None if not found)
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` and `updated_at` to `at`.
    ///
    /// # Returns
    /// `false` if no such token exists
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<bool, SessionError>;
}
