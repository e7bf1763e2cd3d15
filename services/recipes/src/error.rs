use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("recipe is already in favorites")]
    FavoriteAlreadyExists,
    #[error("recipe is not in favorites")]
    FavoriteNotFound,
    #[error("recipe is already in the shopping cart")]
    ShoppingCartAlreadyExists,
    #[error("recipe is not in the shopping cart")]
    ShoppingCartNotFound,
    #[error("already following this user")]
    FollowAlreadyExists,
    #[error("not following this user")]
    FollowNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::FavoriteAlreadyExists => "FAVORITE_ALREADY_EXISTS",
            Self::FavoriteNotFound => "FAVORITE_NOT_FOUND",
            Self::ShoppingCartAlreadyExists => "SHOPPING_CART_ALREADY_EXISTS",
            Self::ShoppingCartNotFound => "SHOPPING_CART_NOT_FOUND",
            Self::FollowAlreadyExists => "FOLLOW_ALREADY_EXISTS",
            Self::FollowNotFound => "FOLLOW_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::RecipeNotFound
            | Self::UserNotFound
            | Self::IngredientNotFound
            | Self::TagNotFound => StatusCode::NOT_FOUND,
            Self::FavoriteAlreadyExists
            | Self::FavoriteNotFound
            | Self::ShoppingCartAlreadyExists
            | Self::ShoppingCartNotFound
            | Self::FollowAlreadyExists
            | Self::FollowNotFound
            | Self::UserAlreadyExists
            | Self::TagAlreadyExists => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation { field, .. } = &self {
            body["field"] = serde_json::Value::from(*field);
        }
        (status, axum::Json(body)).into_response()
    }
}
