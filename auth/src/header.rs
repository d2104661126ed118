use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// Error type for Authorization header extraction.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("No Authorization header included in request")]
    NoAuthHeader,

    #[error("Malformed Authorization header")]
    MalformedHeader,
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// # Errors
/// * `NoAuthHeader` - Header is absent
/// * `MalformedHeader` - Header is not `Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, BEARER_SCHEME)
}

/// Extract the key from `Authorization: ApiKey <key>`.
///
/// # Errors
/// * `NoAuthHeader` - Header is absent
/// * `MalformedHeader` - Header is not `ApiKey <key>`
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, API_KEY_SCHEME)
}

fn extract_credential<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::NoAuthHeader)?
        .to_str()
        .map_err(|_| HeaderError::MalformedHeader)?;

    match value.split_once(' ') {
        Some((found, credential)) if found == scheme => {
            let credential = credential.trim();
            if credential.is_empty() || credential.contains(' ') {
                Err(HeaderError::MalformedHeader)
            } else {
                Ok(credential)
            }
        }
        _ => Err(HeaderError::MalformedHeader),
    }
}
