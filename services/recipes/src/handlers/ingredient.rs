use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::handlers::response::IngredientResponse;
use crate::handlers::{json_body, query_params, viewer};
use crate::state::AppState;
use crate::usecase::ingredient::{
    CreateIngredientUseCase, GetIngredientUseCase, IngredientInput, ListIngredientsUseCase,
};

#[derive(Deserialize, Default)]
pub struct IngredientSearchQuery {
    /// Name prefix, matched case-sensitively.
    pub name: Option<String>,
}

// ── GET /ingredients ─────────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    query: Result<Query<IngredientSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<IngredientResponse>>, RecipesServiceError> {
    let query = query_params(query)?;
    let uc = ListIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let list = uc.execute(query.name.as_deref()).await?;
    Ok(Json(list.into_iter().map(IngredientResponse::from).collect()))
}

// ── GET /ingredients/{id} ────────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, RecipesServiceError> {
    let uc = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /ingredients (admin) ────────────────────────────────────────────────

pub async fn create_ingredient(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<IngredientInput>, JsonRejection>,
) -> Result<(StatusCode, Json<IngredientResponse>), RecipesServiceError> {
    let input = json_body(body)?;
    let uc = CreateIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = uc.execute(&viewer(Some(&identity)), input).await?;
    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
