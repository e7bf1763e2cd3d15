use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::filter::RecipeFilter;
use crate::error::RecipesServiceError;
use crate::handlers::response::RecipeResponse;
use crate::handlers::{json_body, query_params, viewer};
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    RecipeInput, RecipePatchInput, UpdateRecipeUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i64,
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

fn ingredient_pairs(lines: Vec<IngredientAmountRequest>) -> Vec<(i32, i64)> {
    lines.into_iter().map(|l| (l.id, l.amount)).collect()
}

// ── Query params ─────────────────────────────────────────────────────────────

/// `tags` may repeat: `?tags=breakfast&tags=lunch`.
#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "foodgram_core::serde::optional_flag")]
    pub is_favorited: Option<bool>,
    #[serde(default, deserialize_with = "foodgram_core::serde::optional_flag")]
    pub is_in_shopping_cart: Option<bool>,
}

// ── GET /recipes ─────────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    query: Result<Query<RecipeListQuery>, QueryRejection>,
) -> Result<Json<Vec<RecipeResponse>>, RecipesServiceError> {
    let query = query_params(query)?;
    let viewer = viewer(identity.as_ref());
    let filter = RecipeFilter::new(
        &viewer,
        query.author,
        query.tags,
        query.is_favorited,
        query.is_in_shopping_cart,
    );
    let page = PageRequest::from_query(query.page, query.limit);

    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let views = uc.execute(&viewer, &filter, page).await?;
    Ok(Json(views.into_iter().map(RecipeResponse::from).collect()))
}

// ── GET /recipes/{id} ────────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
    };
    let view = uc.execute(&viewer(identity.as_ref()), id).await?;
    Ok(Json(view.into()))
}

// ── POST /recipes ────────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeResponse>), RecipesServiceError> {
    let body = json_body(body)?;
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let view = uc
        .execute(
            &viewer(Some(&identity)),
            RecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: ingredient_pairs(body.ingredients),
                tags: body.tags,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /recipes/{id} ──────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<UpdateRecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, RecipesServiceError> {
    let body = json_body(body)?;
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let view = uc
        .execute(
            &viewer(Some(&identity)),
            id,
            RecipePatchInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: body.ingredients.map(ingredient_pairs),
                tags: body.tags,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /recipes/{id} ─────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = DeleteRecipeUseCase {
        repo: state.recipe_repo(),
    };
    uc.execute(&viewer(Some(&identity)), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
