use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::refresh_token::ports::RefreshTokenServicePort;
use crate::inbound::http::router::AppState;

/// Exchange the refresh token carried as bearer credential for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = auth::credentials::bearer_token(&headers)
        .map_err(|err| ApiError::from(auth::AuthError::from(err)))?;

    let token = state.refresh_token_service.exchange(refresh_token).await?;

    Ok(ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::credentials::bearer_token(&headers)
        .map_err(|err| ApiError::from(auth::AuthError::from(err)))?;

    state.refresh_token_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
