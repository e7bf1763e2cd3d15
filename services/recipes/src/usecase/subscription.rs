use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{Subscription, User, UserView};
use crate::error::RecipesServiceError;

async fn subscription<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<Subscription, RecipesServiceError> {
    let previews = recipes.previews_by_author(author.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(Subscription {
        author: UserView {
            user: author,
            is_subscribed: true,
        },
        recipes: previews,
        recipes_count,
    })
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<Subscription>, RecipesServiceError> {
        let authors = self.follows.list_following(user_id, page).await?;
        let mut out = Vec::with_capacity(authors.len());
        for author in authors {
            out.push(subscription(&self.recipes, author, recipes_limit).await?);
        }
        Ok(out)
    }
}

// ── GetSubscription (response of a fresh follow) ─────────────────────────────

pub struct GetSubscriptionUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> GetSubscriptionUseCase<U, R> {
    pub async fn execute(
        &self,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<Subscription, RecipesServiceError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        subscription(&self.recipes, author, recipes_limit).await
    }
}
