use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::claims::ACCESS_TOKEN_ISSUER;
use super::errors::JwtError;

/// Decoded payload. Claims are optional so an absent one maps to `MissingClaim`.
#[derive(Debug, Deserialize)]
struct ReceivedClaims {
    sub: Option<String>,
}

/// JWT token handler for encoding and decoding tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single symmetric secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token with the given validation rules.
    pub fn decode<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
        validation: &Validation,
    ) -> Result<T, JwtError> {
        decode::<T>(token, &self.decoding_key, validation)
            .map(|token_data| token_data.claims)
            .map_err(map_decode_error)
    }

    /// Issue a signed access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Signed JWT with issuer, subject, issued-at and expiry set
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&AccessClaims::for_user(user_id, Utc::now(), ttl))
    }

    /// Validate an access token and return the user id it was issued for.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not verify under this secret
    /// * `InvalidIssuer` - Issuer is not the access-token issuer
    /// * `Expired` - Expiry is in the past
    /// * `MalformedSubject` - Subject is not a UUID
    /// * `MissingClaim` - A required registered claim is absent
    /// * `Malformed` - Input is not a decodable JWT
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims: ReceivedClaims = self.decode(token, &self.access_validation())?;
        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        Uuid::parse_str(&subject).map_err(|e| JwtError::MalformedSubject(e.to_string()))
    }

    fn access_validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;
        validation
    }
}

/// Issue an access token without holding a handler.
pub fn issue_access_token(user_id: Uuid, secret: &[u8], ttl: Duration) -> Result<String, JwtError> {
    JwtHandler::new(secret).issue_access_token(user_id, ttl)
}

/// Validate an access token without holding a handler.
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<Uuid, JwtError> {
    JwtHandler::new(secret).validate_access_token(token)
}

fn map_decode_error(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        _ => JwtError::Malformed(error.to_string()),
    }
}
