use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::config::Platform;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.metrics.file_server_hits()
    ))
}

/// Zero the hit counter and delete every user. Development platform only.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Reset refused outside dev");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    state.metrics.reset();
    let deleted_users = state.user_service.delete_all_users().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData { deleted_users },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub deleted_users: u64,
}
