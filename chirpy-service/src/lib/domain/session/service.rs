use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use super::errors::SessionError;
use super::models::LoginCommand;
use super::models::RefreshToken;
use super::models::Session;
use super::ports::RefreshTokenRepository;
use super::ports::SessionServicePort;
use crate::domain::user::ports::UserRepository;

/// Token lifetimes applied by the session service.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(60),
        }
    }
}

impl SessionSettings {
    /// Lifetime for a login that asked for `requested` seconds.
    ///
    /// Only a positive request shorter than the default is honored.
    pub fn access_token_ttl_for(&self, requested: Option<i64>) -> Duration {
        match requested {
            Some(seconds) if seconds > 0 && seconds < self.access_token_ttl.num_seconds() => {
                Duration::seconds(seconds)
            }
            _ => self.access_token_ttl,
        }
    }
}

/// Concrete implementation of SessionServicePort.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    settings: SessionSettings,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - User lookup by email
    /// * `refresh_tokens` - Refresh token persistence
    /// * `authenticator` - Password verification and token signing
    /// * `settings` - Token lifetimes
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            settings,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match self.users.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(SessionError::InvalidCredentials);
            }
        };

        if let Err(e) = self
            .authenticator
            .verify_password(&command.password, &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, error = %e, "Login rejected");
            return Err(SessionError::InvalidCredentials);
        }

        let ttl = self
            .settings
            .access_token_ttl_for(command.expires_in_seconds);
        let access_token = self.authenticator.issue_access_token(user.id.0, ttl)?;

        let now = Utc::now();
        let refresh_token = self
            .refresh_tokens
            .create(RefreshToken {
                token: self.authenticator.generate_refresh_token(),
                user_id: user.id,
                created_at: now,
                updated_at: now,
                expires_at: now + self.settings.refresh_token_ttl,
                revoked_at: None,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let stored = self
            .refresh_tokens
            .find(refresh_token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)?;

        if stored.is_revoked() {
            return Err(SessionError::RefreshTokenRevoked);
        }
        if stored.is_expired_at(Utc::now()) {
            return Err(SessionError::RefreshTokenExpired);
        }

        let access_token = self
            .authenticator
            .issue_access_token(stored.user_id.0, self.settings.access_token_ttl)?;

        Ok(access_token)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        if self.refresh_tokens.revoke(refresh_token, Utc::now()).await? {
            Ok(())
        } else {
            Err(SessionError::RefreshTokenNotFound)
        }
    }
}
