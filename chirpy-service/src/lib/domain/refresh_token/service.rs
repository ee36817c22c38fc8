use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::refresh_token::errors::RefreshError;
use crate::domain::refresh_token::models::RefreshToken;
use crate::domain::refresh_token::ports::RefreshTokenRepository;
use crate::domain::refresh_token::ports::RefreshTokenServicePort;
use crate::domain::user::models::UserId;

/// Issues, validates, revokes and exchanges opaque refresh tokens.
///
/// Holds no token state of its own: every decision is read from the store,
/// and every store call is bounded by `store_timeout`.
pub struct RefreshTokenService<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
    authenticator: Arc<Authenticator>,
    ttl: Duration,
    store_timeout: std::time::Duration,
}

impl<RR> RefreshTokenService<RR>
where
    RR: RefreshTokenRepository,
{
    /// # Arguments
    /// * `repository` - Refresh-token store
    /// * `authenticator` - Issues the access tokens handed out by `exchange`
    /// * `ttl` - Lifetime of newly issued refresh tokens
    /// * `store_timeout` - Upper bound on each store interaction
    pub fn new(
        repository: Arc<RR>,
        authenticator: Arc<Authenticator>,
        ttl: Duration,
        store_timeout: std::time::Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            ttl,
            store_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: F) -> Result<T, RefreshError>
    where
        F: Future<Output = Result<T, RefreshError>> + Send,
    {
        tokio::time::timeout(self.store_timeout, operation)
            .await
            .map_err(|_| {
                tracing::error!(
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Refresh token store timed out"
                );
                RefreshError::StoreUnavailable("timed out".to_string())
            })?
    }

    async fn find(&self, token: &str) -> Result<RefreshToken, RefreshError> {
        self.bounded(self.repository.find_by_token(token))
            .await?
            .ok_or(RefreshError::NotFound)
    }
}

#[async_trait]
impl<RR> RefreshTokenServicePort for RefreshTokenService<RR>
where
    RR: RefreshTokenRepository,
{
    async fn issue(&self, user: UserId) -> Result<RefreshToken, RefreshError> {
        let now = Utc::now();
        let record = RefreshToken {
            token: auth::generate_refresh_token(),
            user_id: user,
            created_at: now,
            updated_at: now,
            expires_at: now + self.ttl,
            revoked_at: None,
        };

        let created = self.bounded(self.repository.create(record)).await?;
        tracing::debug!(user_id = %user, expires_at = %created.expires_at, "Refresh token issued");

        Ok(created)
    }

    async fn validate(&self, token: &str) -> Result<UserId, RefreshError> {
        let record = self.find(token).await?;

        if record.is_expired(Utc::now()) {
            return Err(RefreshError::Expired);
        }

        if record.is_revoked() {
            return Err(RefreshError::Revoked);
        }

        Ok(record.user_id)
    }

    async fn revoke(&self, token: &str) -> Result<(), RefreshError> {
        let record = self.find(token).await?;

        if record.is_revoked() {
            tracing::debug!(user_id = %record.user_id, "Refresh token already revoked");
            return Ok(());
        }

        self.bounded(self.repository.revoke(token, Utc::now()))
            .await?;
        tracing::info!(user_id = %record.user_id, "Refresh token revoked");

        Ok(())
    }

    async fn exchange(&self, token: &str) -> Result<String, RefreshError> {
        let user_id = self.validate(token).await?;

        let access_token = self.authenticator.generate_token(user_id.0)?;
        tracing::debug!(user_id = %user_id, "Refresh token exchanged for access token");

        Ok(access_token)
    }
}
