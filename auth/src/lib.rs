//! Credential and session primitives.
//!
//! - Password hashing (Argon2id)
//! - Access tokens (HS256 JWT) binding a user id to an expiry
//! - `Authorization` header parsing for bearer tokens and API keys
//! - Opaque refresh-token generation
//! - Authorization decisions: authentication, ownership, webhook key
//!
//! Everything here is synchronous and storage-free. Persisting refresh tokens
//! is the job of the consuming service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Guarding a request
//! ```
//! use auth::{AuthorizationGuard, JwtHandler};
//! use chrono::Duration;
//! use http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
//! use uuid::Uuid;
//!
//! let guard = AuthorizationGuard::new(
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!"),
//!     "webhook-key",
//! );
//! let user_id = Uuid::new_v4();
//! let token = guard.jwt_handler().issue(user_id, Duration::hours(1)).unwrap();
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     AUTHORIZATION,
//!     HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
//! );
//! assert_eq!(guard.authenticate(&headers).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use credentials::CredentialError;
pub use guard::AuthError;
pub use guard::AuthorizationGuard;
pub use guard::OwnershipError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
