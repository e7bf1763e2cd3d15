use uuid::Uuid;

use crate::domain::repository::ToggleRelation;
use crate::error::RecipesServiceError;

/// Add or remove a user-scoped relation (favorite, cart entry, follow).
///
/// Adding a present relation and removing an absent one are both rejected with the
/// kind-specific conflict. A missing target is reported before the state is consulted.
pub struct ToggleRelationUseCase<T: ToggleRelation> {
    pub repo: T,
}

impl<T: ToggleRelation> ToggleRelationUseCase<T> {
    pub async fn add(&self, user_id: Uuid, target: T::Target) -> Result<(), RecipesServiceError> {
        let kind = self.repo.kind();
        self.check_target(user_id, target).await?;
        if self.repo.exists(user_id, target).await? {
            return Err(kind.already_exists());
        }
        self.repo.insert(user_id, target).await?;
        tracing::info!(kind = kind.as_str(), user_id = %user_id, "relation added");
        Ok(())
    }

    pub async fn remove(
        &self,
        user_id: Uuid,
        target: T::Target,
    ) -> Result<(), RecipesServiceError> {
        let kind = self.repo.kind();
        self.check_target(user_id, target).await?;
        if !self.repo.remove(user_id, target).await? {
            return Err(kind.not_present());
        }
        tracing::info!(kind = kind.as_str(), user_id = %user_id, "relation removed");
        Ok(())
    }

    async fn check_target(
        &self,
        user_id: Uuid,
        target: T::Target,
    ) -> Result<(), RecipesServiceError> {
        if self.repo.is_self(user_id, target) {
            return Err(RecipesServiceError::validation(
                "following",
                "you cannot follow yourself",
            ));
        }
        if !self.repo.target_exists(target).await? {
            return Err(self.repo.kind().target_missing());
        }
        Ok(())
    }
}
