//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use foodgram_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// User identity injected by the gateway via `x-foodgram-user-id` and `x-foodgram-user-role`.
///
/// As a plain extractor it returns 401 if either header is absent or malformed.
/// Extracted as `Option<IdentityHeaders>` a request without `x-foodgram-user-id`
/// is anonymous (`None`), while a present but malformed identity is still 401.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    /// Unknown role values are treated as the least privileged role.
    pub fn role(&self) -> UserRole {
        UserRole::from_u8(self.user_role).unwrap_or(UserRole::Normal)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }
}

fn header_value<T: std::str::FromStr>(parts: &Parts, name: &str) -> Option<Result<T, ()>> {
    parts.headers.get(name).map(|v| {
        v.to_str()
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .ok_or(())
    })
}

fn parse_identity(parts: &Parts) -> Result<Option<IdentityHeaders>, StatusCode> {
    let Some(user_id) = header_value::<Uuid>(parts, USER_ID_HEADER) else {
        return Ok(None);
    };
    let user_id = user_id.map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_role = header_value::<u8>(parts, USER_ROLE_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Some(IdentityHeaders { user_id, user_role }))
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parse_identity(parts);
        async move { identity?.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let identity = parse_identity(parts);
        async move { identity }
    }
}
