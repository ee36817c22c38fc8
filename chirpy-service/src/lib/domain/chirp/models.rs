use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpBodyError;
use crate::domain::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp entity.
///
/// `user_id` is the author, fixed at creation; it is the owner checked before
/// any mutation.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
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

/// Validated, profanity-filtered chirp text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    pub const MAX_LENGTH: usize = 400;
    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];
    const MASK: &'static str = "****";

    /// Validate and clean a raw chirp body.
    ///
    /// Words are split on single spaces; a word matching a profane word
    /// case-insensitively is replaced by `****`. Attached punctuation
    /// (`Fornax!`) keeps the word intact.
    ///
    /// # Errors
    /// * `Empty` - Body is blank
    /// * `TooLong` - Body exceeds 400 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if body.trim().is_empty() {
            return Err(ChirpBodyError::Empty);
        }

        Ok(Self(Self::clean(&body)))
    }

    /// Wrap text already stored, skipping validation.
    pub fn from_stored(body: String) -> Self {
        Self(body)
    }

    fn clean(body: &str) -> String {
        body.split(' ')
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::PROFANE_WORDS.contains(&lowered.as_str()) {
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Invalid sort direction: {}", other)),
        }
    }
}

/// Listing filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChirpQuery {
    pub author_id: Option<UserId>,
    pub sort: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_cleaning() {
        let body = ChirpBody::new(
            "This is a kerfuffle opinion I need to share with the world".to_string(),
        )
        .unwrap();
        assert_eq!(
            body.as_str(),
            "This is a **** opinion I need to share with the world"
        );

        let body = ChirpBody::new("I hear Mastodon is better than Chirpy. sharbert I need to migrate".to_string()).unwrap();
        assert_eq!(
            body.as_str(),
            "I hear Mastodon is better than Chirpy. **** I need to migrate"
        );
    }

    #[test]
    fn test_body_cleaning_is_case_insensitive_and_keeps_punctuation() {
        let body = ChirpBody::new("Fornax FORNAX fornax!".to_string()).unwrap();
        assert_eq!(body.as_str(), "**** **** fornax!");
    }

    #[test]
    fn test_body_too_long() {
        let result = ChirpBody::new("a".repeat(401));
        assert_eq!(
            result,
            Err(ChirpBodyError::TooLong {
                max: 400,
                actual: 401
            })
        );

        assert!(ChirpBody::new("a".repeat(400)).is_ok());
    }

    #[test]
    fn test_body_empty() {
        assert_eq!(ChirpBody::new(String::new()), Err(ChirpBodyError::Empty));
        assert_eq!(ChirpBody::new("   ".to_string()), Err(ChirpBodyError::Empty));
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
