use crate::domain::permission::ensure_admin;
use crate::domain::repository::TagRepository;
use crate::domain::types::{Tag, Viewer};
use crate::domain::validation;
use crate::error::RecipesServiceError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::TagNotFound)
    }
}

// ── CreateTag ────────────────────────────────────────────────────────────────

pub struct CreateTagInput {
    pub name: String,
    pub color: String,
    pub slug: String,
}

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: CreateTagInput,
    ) -> Result<Tag, RecipesServiceError> {
        ensure_admin(viewer)?;
        let name = validation::bounded_text("name", &input.name, validation::MAX_NAME_LEN)?;
        let color = validation::tag_color(&input.color)?;
        let slug = validation::tag_slug(&input.slug)?;

        if self.repo.exists_conflicting(&name, &color, &slug).await? {
            return Err(RecipesServiceError::TagAlreadyExists);
        }
        let tag = self.repo.create(&name, &color, &slug).await?;
        tracing::info!(tag_id = tag.id, slug = %tag.slug, "tag created");
        Ok(tag)
    }
}
