use chrono::Utc;
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserView, Viewer};
use crate::domain::validation;
use crate::error::RecipesServiceError;

/// Attach `is_subscribed` for the viewer to each user.
async fn user_views<U: UserRepository>(
    users: &U,
    viewer: &Viewer,
    list: Vec<User>,
) -> Result<Vec<UserView>, RecipesServiceError> {
    let followed = match viewer.user_id() {
        Some(viewer_id) if !list.is_empty() => {
            let ids: Vec<Uuid> = list.iter().map(|u| u.id).collect();
            users.followed_among(viewer_id, &ids).await?
        }
        _ => vec![],
    };
    Ok(list
        .into_iter()
        .map(|user| UserView {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub repo: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, RecipesServiceError> {
        let email = validation::email(&input.email)?;
        let username = validation::username(&input.username)?;
        let first_name = validation::bounded_text(
            "first_name",
            &input.first_name,
            validation::MAX_USER_FIELD_LEN,
        )?;
        let last_name = validation::bounded_text(
            "last_name",
            &input.last_name,
            validation::MAX_USER_FIELD_LEN,
        )?;

        if self
            .repo
            .exists_by_email_or_username(&email, &username)
            .await?
        {
            return Err(RecipesServiceError::UserAlreadyExists);
        }

        let user = User {
            id: Uuid::now_v7(),
            email,
            username,
            first_name,
            last_name,
            role: UserRole::Normal.as_u8(),
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub repo: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        page: PageRequest,
    ) -> Result<Vec<UserView>, RecipesServiceError> {
        let list = self.repo.list(page).await?;
        user_views(&self.repo, viewer, list).await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub repo: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, viewer: &Viewer, id: Uuid) -> Result<UserView, RecipesServiceError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)?;
        user_views(&self.repo, viewer, vec![user])
            .await?
            .pop()
            .ok_or(RecipesServiceError::UserNotFound)
    }
}
