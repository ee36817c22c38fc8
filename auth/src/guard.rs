use chrono::DateTime;
use chrono::Utc;
use http::HeaderMap;
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;

use crate::credentials;
use crate::credentials::CredentialError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Authentication failures surfaced by the guard.
///
/// `Credential` and `Token` are kept apart for diagnostics; both mean
/// "unauthenticated" at the request layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Requester is not the owner of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    #[error("Forbidden")]
    Forbidden,
}

/// Authorization decisions built on the credential primitives.
///
/// Holds the two pieces of read-only trust material set at startup: the
/// access-token codec (with its signing secret) and the webhook trusted key.
pub struct AuthorizationGuard {
    jwt_handler: JwtHandler,
    webhook_key: String,
}

impl AuthorizationGuard {
    pub fn new(jwt_handler: JwtHandler, webhook_key: impl Into<String>) -> Self {
        Self {
            jwt_handler,
            webhook_key: webhook_key.into(),
        }
    }

    pub fn jwt_handler(&self) -> &JwtHandler {
        &self.jwt_handler
    }

    /// Resolve the user acting on this request from its bearer access token.
    ///
    /// # Errors
    /// * `Credential` - No well-formed `Authorization: Bearer` header
    /// * `Token` - Token invalid, expired, or from another issuer
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Uuid, AuthError> {
        self.authenticate_at(headers, Utc::now())
    }

    /// Same as `authenticate` with an explicit current time.
    pub fn authenticate_at(
        &self,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> Result<Uuid, AuthError> {
        let token = credentials::bearer_token(headers)?;
        let user_id = self.jwt_handler.validate_at(token, now)?;
        Ok(user_id)
    }

    /// Check the webhook `ApiKey` against the trusted key.
    ///
    /// Missing, malformed and wrong keys all yield `Unauthorized`.
    pub fn authorize_webhook(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let key = credentials::api_key(headers).map_err(|_| AuthError::Unauthorized)?;

        let expected = self.webhook_key.as_bytes();
        let supplied = key.as_bytes();

        if expected.len() != supplied.len() || !bool::from(expected.ct_eq(supplied)) {
            return Err(AuthError::Unauthorized);
        }

        Ok(())
    }
}

/// Gate a mutation on resource ownership: succeeds iff `requester` owns it.
pub fn authorize_ownership(resource_owner: Uuid, requester: Uuid) -> Result<(), OwnershipError> {
    if resource_owner == requester {
        Ok(())
    } else {
        Err(OwnershipError::Forbidden)
    }
}
