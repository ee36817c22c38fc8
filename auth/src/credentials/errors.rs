use thiserror::Error;

/// Error type for credential extraction.
///
/// A missing header, a wrong scheme and an empty value all collapse into one
/// kind; callers only need to know that extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Missing or malformed Authorization header")]
    MissingOrMalformed,
}
