//! Authentication utilities library
//!
//! Provides the authentication building blocks for the chirpy service:
//! - Password hashing (Argon2id)
//! - Access-token issuance and validation (HS256 JWT)
//! - Opaque refresh-token generation
//! - `Authorization` header parsing (`Bearer` and `ApiKey` schemes)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue_access_token(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.validate_access_token(&token).unwrap(), user_id);
//! ```
//!
//! ## Authorization Header
//! ```
//! use auth::extract_bearer;
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
//! assert_eq!(extract_bearer(&headers).unwrap(), "abc");
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use header::extract_api_key;
pub use header::extract_bearer;
pub use header::HeaderError;
pub use jwt::issue_access_token;
pub use jwt::validate_access_token;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::ACCESS_TOKEN_ISSUER;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
