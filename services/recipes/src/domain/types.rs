use chrono::{DateTime, Utc};
use uuid::Uuid;

use foodgram_domain::user::UserRole;

use crate::error::RecipesServiceError;

/// User profile owned by the recipes service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: u8,
    pub created_at: DateTime<Utc>,
}

/// A user together with whether the viewer follows them.
#[derive(Debug, Clone)]
pub struct UserView {
    pub user: User,
    pub is_subscribed: bool,
}

/// The party making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User { id: Uuid, role: UserRole },
}

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User { id, .. } => Some(*id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::User {
                role: UserRole::Admin,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    /// Lowercase `#rrggbb`.
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i16,
}

/// A persisted recipe with its tag and ingredient sets.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i16,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Short recipe form used by toggles and subscription previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePreview {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i16,
}

impl From<&Recipe> for RecipePreview {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// A recipe as seen by a particular viewer.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: UserView,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Requested amount of one ingredient in a recipe draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i16,
}

/// Validated input for creating a recipe.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub text: String,
    pub cooking_time: i16,
    pub image: String,
    pub ingredients: Vec<IngredientAmount>,
    pub tag_ids: Vec<i32>,
}

/// Validated input for updating a recipe. Ingredient and tag sets replace the stored ones.
#[derive(Debug, Clone)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i16>,
    pub image: Option<String>,
    pub ingredients: Vec<IngredientAmount>,
    pub tag_ids: Vec<i32>,
}

/// Recipe ids the viewer has favorited or put in their cart, among a looked-up set.
#[derive(Debug, Clone, Default)]
pub struct RecipeMarks {
    pub favorited: Vec<i32>,
    pub in_shopping_cart: Vec<i32>,
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub author: UserView,
    pub recipes: Vec<RecipePreview>,
    pub recipes_count: u64,
}

/// One aggregated ingredient total from a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListRow {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// User-scoped relations that are toggled on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Favorite,
    ShoppingCart,
    Follow,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
            Self::Follow => "follow",
        }
    }

    /// Error when adding a relation that is already present.
    pub fn already_exists(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::FavoriteAlreadyExists,
            Self::ShoppingCart => RecipesServiceError::ShoppingCartAlreadyExists,
            Self::Follow => RecipesServiceError::FollowAlreadyExists,
        }
    }

    /// Error when removing a relation that is absent.
    pub fn not_present(self) -> RecipesServiceError {
        match self {
            Self::Favorite => RecipesServiceError::FavoriteNotFound,
            Self::ShoppingCart => RecipesServiceError::ShoppingCartNotFound,
            Self::Follow => RecipesServiceError::FollowNotFound,
        }
    }

    /// Error when the relation target does not exist.
    pub fn target_missing(self) -> RecipesServiceError {
        match self {
            Self::Favorite | Self::ShoppingCart => RecipesServiceError::RecipeNotFound,
            Self::Follow => RecipesServiceError::UserNotFound,
        }
    }
}
