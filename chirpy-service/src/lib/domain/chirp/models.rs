use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate root entity.
///
/// A short post bound to its author. Immutable once created.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    /// Generate a new random chirp ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value object.
///
/// Deny-listed words are masked first, then the cleaned text must be
/// between 1 and 140 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 140;
    pub const MASK: &'static str = "****";
    pub const DENY_LIST: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];

    /// Filter and validate raw chirp text.
    ///
    /// # Arguments
    /// * `body` - Raw text as submitted
    ///
    /// # Returns
    /// Cleaned, validated ChirpBody
    ///
    /// # Errors
    /// * `Empty` - Body is empty
    /// * `TooLong` - Cleaned body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let cleaned = Self::mask_profanity(&body);
        let length = cleaned.chars().count();

        if length == 0 {
            Err(ChirpBodyError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(cleaned))
        }
    }

    /// Rebuild a body that was validated before it was stored.
    pub fn from_trusted(body: String) -> Self {
        Self(body)
    }

    /// Replace whole words matching the deny-list, ignoring case.
    ///
    /// Words are space-separated; punctuation is part of the word, so
    /// `"kerfuffle!"` is left alone.
    pub fn mask_profanity(text: &str) -> String {
        text.split(' ')
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::DENY_LIST.contains(&lowered.as_str()) {
                    Self::MASK
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordering of chirp listings by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Filter and ordering for chirp listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListChirpsQuery {
    pub author_id: Option<UserId>,
    pub sort: SortDirection,
}

/// Command to create a new chirp.
#[derive(Debug)]
pub struct CreateChirpCommand {
    pub author_id: UserId,
    pub body: ChirpBody,
}
