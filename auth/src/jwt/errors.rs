use thiserror::Error;

/// Error type for JWT operations.
///
/// Callers surface every validation variant as "unauthorized"; the variants
/// exist for logging and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is not a valid user id: {0}")]
    MalformedSubject(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
