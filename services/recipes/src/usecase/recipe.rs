use std::collections::HashSet;

use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;

use crate::domain::filter::RecipeFilter;
use crate::domain::permission::ensure_can_modify_recipe;
use crate::domain::repository::{
    IngredientRepository, RecipeRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    IngredientAmount, Recipe, RecipeDraft, RecipePatch, RecipePreview, RecipeView, UserView,
    Viewer,
};
use crate::domain::validation;
use crate::error::RecipesServiceError;

// ── Inputs ───────────────────────────────────────────────────────────────────

/// Unvalidated recipe body for creation.
#[derive(Debug, Clone)]
pub struct RecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub image: String,
    /// `(ingredient id, amount)` pairs.
    pub ingredients: Vec<(i32, i64)>,
    pub tags: Vec<i32>,
}

impl RecipeInput {
    pub fn validate(&self) -> Result<RecipeDraft, RecipesServiceError> {
        Ok(RecipeDraft {
            ingredients: validation::ingredient_amounts(&self.ingredients)?,
            tag_ids: validation::tag_ids(&self.tags)?,
            name: validation::recipe_name(&self.name)?,
            text: validation::recipe_text(&self.text)?,
            cooking_time: validation::cooking_time(self.cooking_time)?,
            image: validation::image_data_uri(&self.image)?,
        })
    }
}

/// Unvalidated recipe body for a partial update.
#[derive(Debug, Clone, Default)]
pub struct RecipePatchInput {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<(i32, i64)>>,
    pub tags: Option<Vec<i32>>,
}

impl RecipePatchInput {
    pub fn validate(&self) -> Result<RecipePatch, RecipesServiceError> {
        let required = |field| RecipesServiceError::validation(field, "this field is required");
        let ingredients = self.ingredients.as_deref().ok_or_else(|| required("ingredients"))?;
        let tags = self.tags.as_deref().ok_or_else(|| required("tags"))?;
        Ok(RecipePatch {
            ingredients: validation::ingredient_amounts(ingredients)?,
            tag_ids: validation::tag_ids(tags)?,
            name: self.name.as_deref().map(validation::recipe_name).transpose()?,
            text: self.text.as_deref().map(validation::recipe_text).transpose()?,
            cooking_time: self.cooking_time.map(validation::cooking_time).transpose()?,
            image: self
                .image
                .as_deref()
                .map(validation::image_data_uri)
                .transpose()?,
        })
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// Attach author profiles and the viewer's favorite/cart/subscription marks.
pub(crate) async fn recipe_views<R, U>(
    recipes: &R,
    users: &U,
    viewer: &Viewer,
    list: Vec<Recipe>,
) -> Result<Vec<RecipeView>, RecipesServiceError>
where
    R: RecipeRepository,
    U: UserRepository,
{
    if list.is_empty() {
        return Ok(vec![]);
    }
    let mut author_ids: Vec<Uuid> = list.iter().map(|r| r.author_id).collect();
    author_ids.sort();
    author_ids.dedup();
    let recipe_ids: Vec<i32> = list.iter().map(|r| r.id).collect();

    let authors = users.find_by_ids(&author_ids).await?;
    let (followed, marks) = match viewer.user_id() {
        Some(viewer_id) => (
            users.followed_among(viewer_id, &author_ids).await?,
            recipes.marks(viewer_id, &recipe_ids).await?,
        ),
        None => (vec![], Default::default()),
    };

    list.into_iter()
        .map(|recipe| -> Result<RecipeView, RecipesServiceError> {
            let author = authors
                .iter()
                .find(|u| u.id == recipe.author_id)
                .cloned()
                .ok_or_else(|| {
                    anyhow::anyhow!("author {} of recipe {} missing", recipe.author_id, recipe.id)
                })?;
            Ok(RecipeView {
                is_favorited: marks.favorited.contains(&recipe.id),
                is_in_shopping_cart: marks.in_shopping_cart.contains(&recipe.id),
                author: UserView {
                    is_subscribed: followed.contains(&author.id),
                    user: author,
                },
                recipe,
            })
        })
        .collect()
}

async fn recipe_view<R, U>(
    recipes: &R,
    users: &U,
    viewer: &Viewer,
    id: i32,
) -> Result<RecipeView, RecipesServiceError>
where
    R: RecipeRepository,
    U: UserRepository,
{
    let recipe = recipes
        .find_by_id(id)
        .await?
        .ok_or(RecipesServiceError::RecipeNotFound)?;
    recipe_views(recipes, users, viewer, vec![recipe])
        .await?
        .pop()
        .ok_or(RecipesServiceError::RecipeNotFound)
}

/// Every referenced ingredient and tag must exist.
async fn ensure_references<T, I>(
    tags: &T,
    ingredients: &I,
    ingredient_lines: &[IngredientAmount],
    tag_ids: &[i32],
) -> Result<(), RecipesServiceError>
where
    T: TagRepository,
    I: IngredientRepository,
{
    let ingredient_ids: Vec<i32> = ingredient_lines.iter().map(|l| l.ingredient_id).collect();
    let found: HashSet<i32> = ingredients
        .find_by_ids(&ingredient_ids)
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect();
    if ingredient_ids.iter().any(|id| !found.contains(id)) {
        return Err(RecipesServiceError::IngredientNotFound);
    }

    let found: HashSet<i32> = tags
        .find_by_ids(tag_ids)
        .await?
        .into_iter()
        .map(|t| t.id)
        .collect();
    if tag_ids.iter().any(|id| !found.contains(id)) {
        return Err(RecipesServiceError::TagNotFound);
    }
    Ok(())
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> ListRecipesUseCase<R, U> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<RecipeView>, RecipesServiceError> {
        let list = self.recipes.list(filter, page).await?;
        recipe_views(&self.recipes, &self.users, viewer, list).await
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, U: UserRepository> {
    pub recipes: R,
    pub users: U,
}

impl<R: RecipeRepository, U: UserRepository> GetRecipeUseCase<R, U> {
    pub async fn execute(&self, viewer: &Viewer, id: i32) -> Result<RecipeView, RecipesServiceError> {
        recipe_view(&self.recipes, &self.users, viewer, id).await
    }
}

// ── GetRecipePreview ─────────────────────────────────────────────────────────

pub struct GetRecipePreviewUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> GetRecipePreviewUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<RecipePreview, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(|r| RecipePreview::from(&r))
            .ok_or(RecipesServiceError::RecipeNotFound)
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, U, T, I>
where
    R: RecipeRepository,
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub users: U,
    pub tags: T,
    pub ingredients: I,
}

impl<R, U, T, I> CreateRecipeUseCase<R, U, T, I>
where
    R: RecipeRepository,
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: RecipeInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let author_id = viewer.user_id().ok_or(RecipesServiceError::Forbidden)?;
        let draft = input.validate()?;
        ensure_references(&self.tags, &self.ingredients, &draft.ingredients, &draft.tag_ids)
            .await?;
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(RecipesServiceError::UserNotFound);
        }

        let id = self.recipes.create(author_id, &draft).await?;
        tracing::info!(recipe_id = id, user_id = %author_id, "recipe created");
        recipe_view(&self.recipes, &self.users, viewer, id).await
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct UpdateRecipeUseCase<R, U, T, I>
where
    R: RecipeRepository,
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub recipes: R,
    pub users: U,
    pub tags: T,
    pub ingredients: I,
}

impl<R, U, T, I> UpdateRecipeUseCase<R, U, T, I>
where
    R: RecipeRepository,
    U: UserRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        viewer: &Viewer,
        id: i32,
        input: RecipePatchInput,
    ) -> Result<RecipeView, RecipesServiceError> {
        let recipe = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify_recipe(viewer, recipe.author_id)?;

        let patch = input.validate()?;
        ensure_references(&self.tags, &self.ingredients, &patch.ingredients, &patch.tag_ids)
            .await?;

        self.recipes.update(id, &patch).await?;
        tracing::info!(recipe_id = id, user_id = ?viewer.user_id(), "recipe updated");
        recipe_view(&self.recipes, &self.users, viewer, id).await
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub repo: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, viewer: &Viewer, id: i32) -> Result<(), RecipesServiceError> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::RecipeNotFound)?;
        ensure_can_modify_recipe(viewer, recipe.author_id)?;

        if !self.repo.delete(id).await? {
            return Err(RecipesServiceError::RecipeNotFound);
        }
        tracing::info!(recipe_id = id, user_id = ?viewer.user_id(), "recipe deleted");
        Ok(())
    }
}
