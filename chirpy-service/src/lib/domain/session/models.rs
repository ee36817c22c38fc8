use std::fmt;

use crate::domain::refresh_token::models::RefreshToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlaintextPassword;
use crate::domain::user::models::User;

#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: PlaintextPassword,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: PlaintextPassword) -> Self {
        Self { email, password }
    }
}

/// Credentials handed to a user after a successful login.
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user.id)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token)
            .finish()
    }
}
