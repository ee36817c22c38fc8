use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::refresh_token::errors::RefreshError;
use crate::domain::refresh_token::models::RefreshToken;
use crate::domain::user::models::UserId;

/// Port for refresh-token lifecycle operations.
#[async_trait]
pub trait RefreshTokenServicePort: Send + Sync + 'static {
    /// Mint and persist a new refresh token for `user`.
    async fn issue(&self, user: UserId) -> Result<RefreshToken, RefreshError>;

    /// Resolve the owner of a usable refresh token.
    ///
    /// # Errors
    /// * `NotFound` - No record for this token
    /// * `Expired` - Past its expiry (checked before revocation)
    /// * `Revoked` - Explicitly revoked
    /// * `StoreUnavailable` - Store failed or timed out
    async fn validate(&self, token: &str) -> Result<UserId, RefreshError>;

    /// Revoke a refresh token. Revoking an already revoked token succeeds
    /// and keeps the original revocation time.
    ///
    /// # Errors
    /// * `NotFound` - No record for this token
    /// * `StoreUnavailable` - Store failed or timed out
    async fn revoke(&self, token: &str) -> Result<(), RefreshError>;

    /// Validate a refresh token and issue a fresh access token for its owner.
    /// The refresh token itself stays usable.
    async fn exchange(&self, token: &str) -> Result<String, RefreshError>;
}

/// Refresh-token record store.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, record: RefreshToken) -> Result<RefreshToken, RefreshError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RefreshError>;

    /// Set `revoked_at` if it is still unset.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), RefreshError>;
}
