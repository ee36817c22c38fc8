use std::sync::OnceLock;

use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and access
/// token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    decoy_hash: OnceLock<String>,
}

/// Fixed input hashed once to give unknown-user logins a hash to verify against.
const DECOY_PASSWORD: &str = "chirpy-decoy-password";

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl From<PasswordError> for AuthenticationError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AuthenticationError::InvalidCredentials,
            other => AuthenticationError::PasswordError(other),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_handler` - Access token codec holding the signing secret
    /// * `access_token_ttl` - Lifetime of every access token issued here
    pub fn new(jwt_handler: JwtHandler, access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            access_token_ttl,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - User the token is issued to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.password_hasher.verify(password, stored_hash)?;

        let access_token = self.generate_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for a user that does not exist.
    ///
    /// Runs a full Argon2 verification against a decoy hash so the rejection
    /// costs the same as a wrong password. Always `InvalidCredentials`.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        let decoy = self.decoy_hash.get_or_init(|| {
            self.password_hasher
                .hash(DECOY_PASSWORD)
                .unwrap_or_default()
        });

        let _ = self.password_hasher.verify(password, decoy);
        AuthenticationError::InvalidCredentials
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the refresh token already proved identity.
    pub fn generate_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.access_token_ttl)
    }
}
