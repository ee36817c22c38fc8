use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::refresh_token::errors::RefreshError;
use crate::domain::session::errors::SessionError;
use crate::user::errors::UserError;

pub mod admin;
pub mod chirps;
pub mod health;
pub mod login;
pub mod refresh;
pub mod users;
pub mod webhooks;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ChirpError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            ChirpError::InvalidChirpId(_) => ApiError::BadRequest(err.to_string()),
            ChirpError::InvalidBody(_) => ApiError::UnprocessableEntity(err.to_string()),
            ChirpError::DatabaseError(_) | ChirpError::Unknown(_) => {
                tracing::error!(error = %err, "Chirp operation failed");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        if err.is_client_error() {
            tracing::warn!(reason = %err, "Refresh token rejected");
            return ApiError::Unauthorized("Invalid refresh token".to_string());
        }

        tracing::error!(error = %err, "Refresh token operation failed");
        match err {
            RefreshError::StoreUnavailable(_) => {
                ApiError::ServiceUnavailable("Token store unavailable".to_string())
            }
            _ => ApiError::InternalServerError("Failed to issue access token".to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::User(err) => ApiError::from(err),
            SessionError::RefreshToken(err) => ApiError::from(err),
            SessionError::Token(_) | SessionError::Unknown(_) => {
                tracing::error!(error = %err, "Login failed");
                ApiError::InternalServerError("Login failed".to_string())
            }
        }
    }
}

impl From<auth::AuthError> for ApiError {
    fn from(err: auth::AuthError) -> Self {
        tracing::warn!(reason = %err, "Request not authenticated");
        ApiError::Unauthorized("Unauthorized".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chirp::models::ChirpId;

    #[test]
    fn test_refresh_client_errors_are_indistinguishable() {
        let responses: Vec<ApiError> = [
            RefreshError::NotFound,
            RefreshError::Expired,
            RefreshError::Revoked,
        ]
        .into_iter()
        .map(ApiError::from)
        .collect();

        assert!(responses
            .iter()
            .all(|e| *e == ApiError::Unauthorized("Invalid refresh token".to_string())));
    }

    #[test]
    fn test_store_unavailable_is_not_a_client_error() {
        let err = ApiError::from(RefreshError::StoreUnavailable("timed out".to_string()));
        assert!(matches!(err, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_unknown_email_maps_to_same_response_as_wrong_password() {
        assert_eq!(
            ApiError::from(SessionError::InvalidCredentials),
            ApiError::Unauthorized("Incorrect email or password".to_string())
        );
    }

    #[test]
    fn test_chirp_forbidden() {
        let err = ApiError::from(ChirpError::Forbidden(ChirpId::new()));
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_auth_errors_collapse_to_unauthorized() {
        let missing = ApiError::from(auth::AuthError::Credential(
            auth::CredentialError::MissingOrMalformed,
        ));
        let expired = ApiError::from(auth::AuthError::Token(auth::JwtError::Expired));
        assert_eq!(missing, expired);
    }
}
