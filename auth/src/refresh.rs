use rand::Rng;

/// Number of random bytes behind a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// 32 bytes from the thread-local CSPRNG, hex-encoded. The token carries no
/// claims; its validity lives with whoever stores it.
pub fn generate_refresh_token() -> String {
    let random_bytes: [u8; REFRESH_TOKEN_BYTES] = rand::thread_rng().gen();
    hex::encode(random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_shape() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_refresh_tokens_are_unique() {
        let first = generate_refresh_token();
        let second = generate_refresh_token();
        assert_ne!(first, second);
    }
}
