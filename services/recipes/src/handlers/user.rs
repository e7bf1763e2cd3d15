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

use crate::error::RecipesServiceError;
use crate::handlers::response::UserResponse;
use crate::handlers::{json_body, query_params, viewer};
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
};

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<UserResponse>>, RecipesServiceError> {
    let page = query_params(page)?;
    let uc = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let views = uc.execute(&viewer(identity.as_ref()), page.clamped()).await?;
    Ok(Json(views.into_iter().map(UserResponse::from).collect()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), RecipesServiceError> {
    let body = json_body(body)?;
    let uc = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    let user = uc
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    let view = uc
        .execute(&viewer(Some(&identity)), identity.user_id)
        .await?;
    Ok(Json(view.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let uc = GetUserUseCase {
        repo: state.user_repo(),
    };
    let view = uc.execute(&viewer(identity.as_ref()), id).await?;
    Ok(Json(view.into()))
}
