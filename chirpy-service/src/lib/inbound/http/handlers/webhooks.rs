use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider callback. Authenticated by the shared API key only, before
/// the body is looked at.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    state.guard.authorize_webhook(&headers)?;

    let Json(event) =
        payload.map_err(|rejection| ApiError::UnprocessableEntity(rejection.body_text()))?;

    if event.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %event.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&event.data.user_id).map_err(UserError::from)?;
    state.user_service.upgrade_user(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookData {
    pub user_id: String,
}
