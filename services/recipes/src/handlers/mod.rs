pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod response;
pub mod subscription;
pub mod tag;
pub mod user;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::{Query, QueryRejection};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::Viewer;
use crate::error::RecipesServiceError;

/// Anonymous when the gateway injected no identity.
pub(crate) fn viewer(identity: Option<&IdentityHeaders>) -> Viewer {
    identity.map_or(Viewer::Anonymous, |i| Viewer::User {
        id: i.user_id,
        role: i.role(),
    })
}

/// Unwrap a JSON body, reporting malformed input as a validation error.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, RecipesServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RecipesServiceError::validation("body", rejection.body_text()))
}

/// Unwrap query parameters, reporting unparsable values as a validation error.
pub(crate) fn query_params<T>(
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, RecipesServiceError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| RecipesServiceError::validation("query", rejection.to_string()))
}
