use std::sync::Arc;

use auth::Authenticator;

use crate::domain::refresh_token::ports::RefreshTokenServicePort;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserServicePort;

/// Login flow: password verification, access token and refresh token.
pub struct SessionService<US, RS>
where
    US: UserServicePort,
    RS: RefreshTokenServicePort,
{
    user_service: Arc<US>,
    refresh_tokens: Arc<RS>,
    authenticator: Arc<Authenticator>,
}

impl<US, RS> SessionService<US, RS>
where
    US: UserServicePort,
    RS: RefreshTokenServicePort,
{
    pub fn new(
        user_service: Arc<US>,
        refresh_tokens: Arc<RS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            user_service,
            refresh_tokens,
            authenticator,
        }
    }

    /// Verify email and password, then open a session for the user.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `RefreshToken` - Refresh token could not be persisted
    /// * `User` - User lookup failed for infrastructure reasons
    pub async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match self.user_service.get_user_by_email(&command.email).await {
            Ok(user) => Some(user),
            Err(UserError::NotFoundByEmail(_)) => None,
            Err(err) => return Err(SessionError::User(err)),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.expose().to_owned();
        let credentials = user
            .as_ref()
            .map(|user| (user.password_hash.clone(), user.id.0));

        // Argon2 is CPU bound; keep it off the async workers.
        let result = tokio::task::spawn_blocking(move || match credentials {
            Some((hash, subject)) => authenticator.authenticate(&password, &hash, subject),
            None => Err(authenticator.reject_unknown_user(&password)),
        })
        .await
        .map_err(|e| SessionError::Unknown(e.to_string()))?;

        let Some(user) = user else {
            tracing::warn!("Login rejected for unknown email");
            return Err(SessionError::InvalidCredentials);
        };

        let result = result.map_err(|err| {
            tracing::warn!(user_id = %user.id, "Login rejected");
            SessionError::from(err)
        })?;

        let refresh_token = self.refresh_tokens.issue(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token,
        })
    }
}
