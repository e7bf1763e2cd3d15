use crate::domain::permission::ensure_admin;
use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, Viewer};
use crate::domain::validation;
use crate::error::RecipesServiceError;

// ── ListIngredients ──────────────────────────────────────────────────────────

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    pub async fn execute(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let prefix = name_prefix.filter(|p| !p.is_empty());
        self.repo.list(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::IngredientNotFound)
    }
}

// ── CreateIngredient ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, serde::Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

impl IngredientInput {
    fn validate(&self) -> Result<(String, String), RecipesServiceError> {
        Ok((
            validation::bounded_text("name", &self.name, validation::MAX_NAME_LEN)?,
            validation::bounded_text(
                "measurement_unit",
                &self.measurement_unit,
                validation::MAX_NAME_LEN,
            )?,
        ))
    }
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(
        &self,
        viewer: &Viewer,
        input: IngredientInput,
    ) -> Result<Ingredient, RecipesServiceError> {
        ensure_admin(viewer)?;
        let (name, unit) = input.validate()?;
        let (ingredient, created) = self.repo.get_or_create(&name, &unit).await?;
        if !created {
            return Err(RecipesServiceError::validation(
                "name",
                "ingredient with this name and measurement unit already exists",
            ));
        }
        tracing::info!(ingredient_id = ingredient.id, "ingredient created");
        Ok(ingredient)
    }
}

// ── LoadIngredients ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub created: usize,
    pub existing: usize,
}

/// Bulk import with get-or-create semantics; loading the same file twice creates nothing new.
pub struct LoadIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> LoadIngredientsUseCase<R> {
    pub async fn execute(
        &self,
        items: Vec<IngredientInput>,
    ) -> Result<LoadReport, RecipesServiceError> {
        let mut report = LoadReport::default();
        for item in items {
            let (name, unit) = item.validate()?;
            let (_, created) = self.repo.get_or_create(&name, &unit).await?;
            if created {
                report.created += 1;
            } else {
                report.existing += 1;
            }
        }
        Ok(report)
    }
}
