use thiserror::Error;

/// Error type for password operations.
///
/// Verification exposes a single `Mismatch` kind: a wrong password and a
/// malformed stored hash are indistinguishable to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    Mismatch,
}
