use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use uuid::Uuid;

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::error::RecipesServiceError;
use crate::handlers::query_params;
use crate::handlers::response::SubscriptionResponse;
use crate::state::AppState;
use crate::usecase::relation::ToggleRelationUseCase;
use crate::usecase::subscription::{GetSubscriptionUseCase, ListSubscriptionsUseCase};

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Truncates each author's recipe previews.
    pub recipes_limit: Option<u32>,
}

impl SubscriptionQuery {
    fn recipes_limit(&self) -> Option<u64> {
        self.recipes_limit.map(u64::from)
    }
}

// ── GET /users/subscriptions ─────────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<Json<Vec<SubscriptionResponse>>, RecipesServiceError> {
    let query = query_params(query)?;
    let uc = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let page = PageRequest::from_query(query.page, query.limit);
    let subs = uc
        .execute(identity.user_id, page, query.recipes_limit())
        .await?;
    Ok(Json(subs.into_iter().map(SubscriptionResponse::from).collect()))
}

// ── POST /users/{id}/subscribe ───────────────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    query: Result<Query<SubscriptionQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), RecipesServiceError> {
    let query = query_params(query)?;
    let uc = ToggleRelationUseCase {
        repo: state.follow_repo(),
    };
    uc.add(identity.user_id, author_id).await?;

    let uc = GetSubscriptionUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let sub = uc.execute(author_id, query.recipes_limit()).await?;
    Ok((StatusCode::CREATED, Json(sub.into())))
}

// ── DELETE /users/{id}/subscribe ─────────────────────────────────────────────

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, RecipesServiceError> {
    let uc = ToggleRelationUseCase {
        repo: state.follow_repo(),
    };
    uc.remove(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
