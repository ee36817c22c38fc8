use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PlaintextPassword;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordInputError;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UserCredentialsRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let (email, password) = body.try_into_parts()?;

    state
        .user_service
        .create_user(CreateUserCommand::new(email, password))
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// Replace the caller's own email and password.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<UserCredentialsRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let (email, password) = body.try_into_parts()?;

    state
        .user_service
        .update_user(&caller.user_id, UpdateUserCommand { email, password })
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for registering or updating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserCredentialsRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ParseCredentialsRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordInputError),
}

impl UserCredentialsRequest {
    pub(crate) fn try_into_parts(
        self,
    ) -> Result<(EmailAddress, PlaintextPassword), ParseCredentialsRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = PlaintextPassword::new(self.password)?;
        Ok((email, password))
    }
}

impl From<ParseCredentialsRequestError> for ApiError {
    fn from(err: ParseCredentialsRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            is_chirpy_red: user.is_chirpy_red,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> UserCredentialsRequest {
        UserCredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_credentials_request() {
        let (email, password) = request("walt@breakingbad.com", "04234")
            .try_into_parts()
            .unwrap();
        assert_eq!(email.as_str(), "walt@breakingbad.com");
        assert_eq!(password.expose(), "04234");
    }

    #[test]
    fn test_invalid_email_is_unprocessable() {
        let err = request("not-an-email", "04234").try_into_parts().unwrap_err();
        assert!(matches!(
            ApiError::from(err),
            ApiError::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn test_empty_password_is_unprocessable() {
        let err = request("walt@breakingbad.com", "").try_into_parts().unwrap_err();
        assert!(matches!(err, ParseCredentialsRequestError::Password(_)));
    }
}
