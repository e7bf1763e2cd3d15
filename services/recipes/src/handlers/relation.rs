use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::error::RecipesServiceError;
use crate::handlers::response::RecipePreviewResponse;
use crate::state::AppState;
use crate::usecase::recipe::GetRecipePreviewUseCase;
use crate::usecase::relation::ToggleRelationUseCase;
use crate::usecase::shopping_cart::DownloadShoppingListUseCase;

async fn preview(
    state: &AppState,
    recipe_id: i32,
) -> Result<Json<RecipePreviewResponse>, RecipesServiceError> {
    let uc = GetRecipePreviewUseCase {
        repo: state.recipe_repo(),
    };
    Ok(Json(uc.execute(recipe_id).await?.into()))
}

// ── POST /recipes/{id}/favorite ──────────────────────────────────────────────

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipePreviewResponse>), RecipesServiceError> {
    let uc = ToggleRelationUseCase {
        repo: state.favorite_repo(),
    };
    uc.add(identity.user_id, id).await?;
    Ok((StatusCode::CREATED, preview(&state, id).await?))
}

// ── DELETE /recipes/{id}/favorite ────────────────────────────────────────────

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = ToggleRelationUseCase {
        repo: state.favorite_repo(),
    };
    uc.remove(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /recipes/{id}/shopping_cart ─────────────────────────────────────────

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipePreviewResponse>), RecipesServiceError> {
    let uc = ToggleRelationUseCase {
        repo: state.shopping_cart_repo(),
    };
    uc.add(identity.user_id, id).await?;
    Ok((StatusCode::CREATED, preview(&state, id).await?))
}

// ── DELETE /recipes/{id}/shopping_cart ───────────────────────────────────────

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = ToggleRelationUseCase {
        repo: state.shopping_cart_repo(),
    };
    uc.remove(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, RecipesServiceError> {
    let uc = DownloadShoppingListUseCase {
        repo: state.shopping_cart_repo(),
    };
    let list = uc.execute(identity.user_id).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
        ),
    ];
    Ok((headers, list.to_string()))
}
