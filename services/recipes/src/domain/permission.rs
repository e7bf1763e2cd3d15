use uuid::Uuid;

use crate::domain::types::Viewer;
use crate::error::RecipesServiceError;

/// Only the author or an administrator may change a recipe.
pub fn can_modify_recipe(viewer: &Viewer, author_id: Uuid) -> bool {
    viewer.is_admin() || viewer.user_id() == Some(author_id)
}

pub fn ensure_can_modify_recipe(
    viewer: &Viewer,
    author_id: Uuid,
) -> Result<(), RecipesServiceError> {
    if can_modify_recipe(viewer, author_id) {
        Ok(())
    } else {
        Err(RecipesServiceError::Forbidden)
    }
}

pub fn ensure_admin(viewer: &Viewer) -> Result<(), RecipesServiceError> {
    if viewer.is_admin() {
        Ok(())
    } else {
        Err(RecipesServiceError::Forbidden)
    }
}
