use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of ChirpServicePort.
pub struct ChirpService<CR>
where
    CR: ChirpRepository,
{
    repository: Arc<CR>,
}

impl<CR> ChirpService<CR>
where
    CR: ChirpRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, author: UserId, body: ChirpBody) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body,
            user_id: author,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(chirp).await?;
        tracing::debug!(chirp_id = %created.id, user_id = %created.user_id, "Chirp created");

        Ok(created)
    }

    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        match query.author_id {
            Some(author) => self.repository.list_by_author(author, query.sort).await,
            None => self.repository.list(query.sort).await,
        }
    }

    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id))
    }

    async fn delete_chirp(&self, id: ChirpId, requester: UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        auth::guard::authorize_ownership(chirp.user_id.0, requester.0).map_err(|_| {
            tracing::warn!(
                chirp_id = %id,
                owner = %chirp.user_id,
                requester = %requester,
                "Rejected delete of chirp owned by another user"
            );
            ChirpError::Forbidden(id)
        })?;

        self.repository.delete(id).await?;
        tracing::info!(chirp_id = %id, user_id = %requester, "Chirp deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::chirp::models::SortDirection;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError>;
            async fn list(&self, sort: SortDirection) -> Result<Vec<Chirp>, ChirpError>;
            async fn list_by_author(
                &self,
                author: UserId,
                sort: SortDirection,
            ) -> Result<Vec<Chirp>, ChirpError>;
            async fn delete(&self, id: ChirpId) -> Result<(), ChirpError>;
        }
    }

    fn chirp_by(author: UserId) -> Chirp {
        Chirp {
            id: ChirpId::new(),
            body: ChirpBody::new("I'm the one who knocks!".to_string()).unwrap(),
            user_id: author,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_chirp_records_author() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |chirp| chirp.user_id == author)
            .times(1)
            .returning(|chirp| Ok(chirp));

        let service = ChirpService::new(Arc::new(repository));

        let body = ChirpBody::new("Gale!".to_string()).unwrap();
        let chirp = service.create_chirp(author, body).await.unwrap();
        assert_eq!(chirp.user_id, author);
        assert_eq!(chirp.body.as_str(), "Gale!");
    }

    #[tokio::test]
    async fn test_list_chirps_by_author() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();

        repository.expect_list().times(0);
        repository
            .expect_list_by_author()
            .withf(move |id, sort| *id == author && *sort == SortDirection::Desc)
            .times(1)
            .returning(move |id, _| Ok(vec![chirp_by(id)]));

        let service = ChirpService::new(Arc::new(repository));

        let chirps = service
            .list_chirps(ChirpQuery {
                author_id: Some(author),
                sort: SortDirection::Desc,
            })
            .await
            .unwrap();
        assert_eq!(chirps.len(), 1);
        assert_eq!(chirps[0].user_id, author);
    }

    #[tokio::test]
    async fn test_delete_chirp_by_owner() {
        let mut repository = MockTestChirpRepository::new();
        let owner = UserId::new();
        let chirp = chirp_by(owner);
        let chirp_id = chirp.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(chirp.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == chirp_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = ChirpService::new(Arc::new(repository));

        assert!(service.delete_chirp(chirp_id, owner).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_chirp_by_other_user_is_forbidden() {
        let mut repository = MockTestChirpRepository::new();
        let chirp = chirp_by(UserId::new());
        let chirp_id = chirp.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(chirp.clone())));
        repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(chirp_id, UserId::new()).await;
        assert!(matches!(result, Err(ChirpError::Forbidden(id)) if id == chirp_id));
    }

    #[tokio::test]
    async fn test_delete_missing_chirp() {
        let mut repository = MockTestChirpRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(ChirpId::new(), UserId::new()).await;
        assert!(matches!(result, Err(ChirpError::NotFound(_))));
    }
}
