use async_trait::async_trait;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::models::SortDirection;
use crate::domain::user::models::UserId;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a chirp authored by `author`.
    async fn create_chirp(&self, author: UserId, body: ChirpBody) -> Result<Chirp, ChirpError>;

    /// List chirps, optionally restricted to one author.
    async fn list_chirps(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError>;

    /// Retrieve a single chirp.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError>;

    /// Delete a chirp on behalf of `requester`.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `Forbidden` - `requester` is not the chirp's author
    async fn delete_chirp(&self, id: ChirpId, requester: UserId) -> Result<(), ChirpError>;
}

/// Persistence operations for chirps.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// All chirps ordered by creation time.
    async fn list(&self, sort: SortDirection) -> Result<Vec<Chirp>, ChirpError>;

    /// Chirps of one author ordered by creation time.
    async fn list_by_author(
        &self,
        author: UserId,
        sort: SortDirection,
    ) -> Result<Vec<Chirp>, ChirpError>;

    /// # Errors
    /// * `NotFound` - Chirp does not exist
    async fn delete(&self, id: ChirpId) -> Result<(), ChirpError>;
}
