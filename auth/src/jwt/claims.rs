use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer stamped on every access token and required on validation.
pub const ACCESS_TOKEN_ISSUER: &str = "chirpy-access";

/// Claims carried by an access token.
///
/// Registered RFC 7519 claims only; the subject is the user id in its
/// string form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a user, valid for `ttl` starting at `now`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with iss, sub, iat and exp set
    pub fn for_user(user_id: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: ACCESS_TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
