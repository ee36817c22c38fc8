use thiserror::Error;

use crate::domain::refresh_token::errors::RefreshError;
use crate::domain::user::errors::UserError;

/// Error for login operations.
///
/// An unknown email and a wrong password both surface as `InvalidCredentials`
/// so the response does not reveal which accounts exist.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    RefreshToken(#[from] RefreshError),

    #[error("Failed to issue access token: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<auth::AuthenticationError> for SessionError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
            auth::AuthenticationError::JwtError(err) => SessionError::Token(err),
            auth::AuthenticationError::PasswordError(err) => SessionError::Unknown(err.to_string()),
        }
    }
}
