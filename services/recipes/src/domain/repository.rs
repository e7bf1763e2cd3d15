#![allow(async_fn_in_trait)]

use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::filter::RecipeFilter;
use crate::domain::types::{
    Ingredient, Recipe, RecipeDraft, RecipeMarks, RecipePatch, RecipePreview, RelationKind,
    ShoppingListRow, Tag, User,
};
use crate::error::RecipesServiceError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError>;

    /// Whether any user already holds this email or username.
    async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, RecipesServiceError>;

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError>;

    /// Users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError>;

    /// The subset of `ids` that `follower_id` follows.
    async fn followed_among(
        &self,
        follower_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, RecipesServiceError>;
}

pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError>;

    /// Tags among `ids` that exist. Missing ids are simply absent from the result.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError>;

    /// Whether a tag already uses this name, color or slug.
    async fn exists_conflicting(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<bool, RecipesServiceError>;

    async fn create(&self, name: &str, color: &str, slug: &str)
    -> Result<Tag, RecipesServiceError>;
}

pub trait IngredientRepository: Send + Sync {
    /// Ingredients ordered by name, optionally restricted to a name prefix.
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError>;

    /// Fetch the ingredient with this (name, unit) pair or create it.
    /// Returns `true` alongside the row when it was created.
    async fn get_or_create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<(Ingredient, bool), RecipesServiceError>;
}

pub trait RecipeRepository: Send + Sync {
    /// Recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError>;

    async fn exists(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// Insert the recipe with its tags and ingredient lines atomically. Returns the new id.
    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<i32, RecipesServiceError>;

    /// Apply `patch` atomically, replacing the tag and ingredient sets.
    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<(), RecipesServiceError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError>;

    /// The author's recipes newest first, truncated to `limit` when given.
    async fn previews_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipePreview>, RecipesServiceError>;

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError>;

    /// Which of `recipe_ids` the user has favorited or put in their cart.
    async fn marks(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<RecipeMarks, RecipesServiceError>;
}

/// A user-scoped relation that is toggled between absent and present.
pub trait ToggleRelation: Send + Sync {
    type Target: Copy + Send + Sync;

    fn kind(&self) -> RelationKind;

    /// Whether the relation would point at the acting user themselves.
    fn is_self(&self, _user_id: Uuid, _target: Self::Target) -> bool {
        false
    }

    async fn target_exists(&self, target: Self::Target) -> Result<bool, RecipesServiceError>;

    async fn exists(&self, user_id: Uuid, target: Self::Target)
    -> Result<bool, RecipesServiceError>;

    async fn insert(&self, user_id: Uuid, target: Self::Target)
    -> Result<(), RecipesServiceError>;

    /// Returns `true` if a row was deleted.
    async fn remove(&self, user_id: Uuid, target: Self::Target)
    -> Result<bool, RecipesServiceError>;
}

/// Read side of the follow relation.
pub trait FollowRepository: Send + Sync {
    /// Users followed by `user_id`, ordered by username.
    async fn list_following(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError>;
}

/// Source of aggregated shopping cart totals.
pub trait ShoppingListSource: Send + Sync {
    /// Ingredient totals over every recipe in the user's cart, grouped by (name, unit).
    async fn shopping_list_rows(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListRow>, RecipesServiceError>;
}
