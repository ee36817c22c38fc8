use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::models::SortDirection;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let body = ChirpBody::new(body.body).map_err(ChirpError::from)?;

    state
        .chirp_service
        .create_chirp(caller.user_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let query = params.try_into_query()?;

    let chirps = state.chirp_service.list_chirps(query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        chirps.iter().map(ChirpData::from).collect(),
    ))
}

pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .get_chirp(chirp_id)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::OK, chirp.into()))
}

/// Delete a chirp; only its author may do so.
pub async fn delete_chirp(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .delete_chirp(chirp_id, caller.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ChirpQuery, ApiError> {
        let author_id = self
            .author_id
            .as_deref()
            .map(UserId::from_string)
            .transpose()
            .map_err(UserError::from)?;

        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortDirection>)
            .transpose()
            .map_err(ApiError::UnprocessableEntity)?
            .unwrap_or_default();

        Ok(ChirpQuery { author_id, sort })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpData {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Chirp> for ChirpData {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            body: chirp.body.as_str().to_string(),
            user_id: chirp.user_id.to_string(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_default_to_all_ascending() {
        let query = ListChirpsParams::default().try_into_query().unwrap();
        assert!(query.author_id.is_none());
        assert_eq!(query.sort, SortDirection::Asc);
    }

    #[test]
    fn test_list_params_with_author_and_desc() {
        let author = UserId::new();
        let query = ListChirpsParams {
            author_id: Some(author.to_string()),
            sort: Some("desc".to_string()),
        }
        .try_into_query()
        .unwrap();

        assert_eq!(query.author_id, Some(author));
        assert_eq!(query.sort, SortDirection::Desc);
    }

    #[test]
    fn test_list_params_reject_bad_sort() {
        let result = ListChirpsParams {
            author_id: None,
            sort: Some("sideways".to_string()),
        }
        .try_into_query();

        assert!(matches!(result, Err(ApiError::UnprocessableEntity(_))));
    }
}
