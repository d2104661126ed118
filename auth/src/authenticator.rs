use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;

/// Authentication coordinator combining password hashing and token handling.
///
/// Holds one signing secret for the lifetime of the process.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `InvalidHash` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a signed access token for `user_id`, valid for `ttl`.
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.jwt_handler.issue_access_token(user_id, ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.validate_access_token(token)
    }

    /// Generate a fresh opaque refresh token.
    pub fn generate_refresh_token(&self) -> String {
        generate_refresh_token()
    }
}
