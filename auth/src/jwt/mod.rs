pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::ACCESS_TOKEN_ISSUER;
pub use errors::JwtError;
pub use handler::issue_access_token;
pub use handler::validate_access_token;
pub use handler::JwtHandler;
