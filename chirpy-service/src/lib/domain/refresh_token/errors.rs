use thiserror::Error;

/// Error type for refresh-token operations.
///
/// `NotFound`, `Expired` and `Revoked` are client-caused and all mean the
/// token cannot be used; `StoreUnavailable` is an infrastructure failure.
/// Messages never echo the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token expired")]
    Expired,

    #[error("Refresh token revoked")]
    Revoked,

    #[error("Refresh token store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to issue access token: {0}")]
    Token(#[from] auth::JwtError),
}

impl RefreshError {
    /// Whether the failure was caused by the presented credential rather than
    /// by infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RefreshError::NotFound | RefreshError::Expired | RefreshError::Revoked
        )
    }
}
