use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ChirpError;
use super::models::Chirp;
use super::models::ChirpId;
use super::models::CreateChirpCommand;
use super::models::ListChirpsQuery;
use super::ports::ChirpRepository;
use super::ports::ChirpServicePort;
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
    /// Create a new chirp service.
    ///
    /// # Arguments
    /// * `repository` - Chirp persistence implementation
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ChirpServicePort for ChirpService<CR>
where
    CR: ChirpRepository,
{
    async fn create_chirp(&self, command: CreateChirpCommand) -> Result<Chirp, ChirpError> {
        let now = Utc::now();
        let chirp = Chirp {
            id: ChirpId::new(),
            body: command.body,
            user_id: command.author_id,
            created_at: now,
            updated_at: now,
        };

        let saved_chirp = self.repository.create(chirp).await?;
        tracing::debug!(
            chirp_id = %saved_chirp.id,
            user_id = %saved_chirp.user_id,
            "Chirp created"
        );

        Ok(saved_chirp)
    }

    async fn get_chirp(&self, id: ChirpId) -> Result<Chirp, ChirpError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ChirpError::NotFound(id))
    }

    async fn list_chirps(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError> {
        self.repository.list(query).await
    }

    async fn delete_chirp(&self, id: ChirpId, requester: UserId) -> Result<(), ChirpError> {
        let chirp = self.get_chirp(id).await?;

        if chirp.user_id != requester {
            tracing::warn!(chirp_id = %id, user_id = %requester, "Refused to delete chirp of another author");
            return Err(ChirpError::NotAuthor {
                chirp_id: id,
                user_id: requester,
            });
        }

        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::chirp::models::ChirpBody;
    use crate::domain::chirp::models::SortDirection;

    mock! {
        pub TestChirpRepository {}

        #[async_trait]
        impl ChirpRepository for TestChirpRepository {
            async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;
            async fn find_by_id(&self, id: ChirpId) -> Result<Option<Chirp>, ChirpError>;
            async fn list(&self, query: ListChirpsQuery) -> Result<Vec<Chirp>, ChirpError>;
            async fn delete(&self, id: ChirpId) -> Result<(), ChirpError>;
        }
    }

    fn chirp_by(id: ChirpId, author: UserId) -> Chirp {
        let now = Utc::now();
        Chirp {
            id,
            body: ChirpBody::from_trusted("I'm the one who knocks!".to_string()),
            user_id: author,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_chirp() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |chirp| chirp.user_id == author && chirp.body.as_str() == "hello ****")
            .times(1)
            .returning(|chirp| Ok(chirp));

        let service = ChirpService::new(Arc::new(repository));

        let command = CreateChirpCommand {
            author_id: author,
            body: ChirpBody::new("hello Fornax".to_string()).unwrap(),
        };

        let chirp = service.create_chirp(command).await.unwrap();
        assert_eq!(chirp.user_id, author);
        assert_eq!(chirp.created_at, chirp.updated_at);
    }

    #[tokio::test]
    async fn test_get_chirp_not_found() {
        let mut repository = MockTestChirpRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ChirpService::new(Arc::new(repository));

        let id = ChirpId::new();
        let result = service.get_chirp(id).await;
        assert!(matches!(result, Err(ChirpError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_list_chirps_passes_query_through() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();
        let query = ListChirpsQuery {
            author_id: Some(author),
            sort: SortDirection::Desc,
        };

        repository
            .expect_list()
            .with(eq(query))
            .times(1)
            .returning(move |_| Ok(vec![chirp_by(ChirpId::new(), author)]));

        let service = ChirpService::new(Arc::new(repository));

        let chirps = service.list_chirps(query).await.unwrap();
        assert_eq!(chirps.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_chirp_by_author() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();
        let id = ChirpId::new();

        repository
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |id| Ok(Some(chirp_by(id, author))));
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = ChirpService::new(Arc::new(repository));

        assert!(service.delete_chirp(id, author).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_chirp_by_someone_else() {
        let mut repository = MockTestChirpRepository::new();
        let author = UserId::new();
        let intruder = UserId::new();
        let id = ChirpId::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |id| Ok(Some(chirp_by(id, author))));
        repository.expect_delete().times(0);

        let service = ChirpService::new(Arc::new(repository));

        let result = service.delete_chirp(id, intruder).await;
        assert!(matches!(result, Err(ChirpError::NotAuthor { .. })));
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
