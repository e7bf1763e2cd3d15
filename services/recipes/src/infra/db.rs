use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, Condition,
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
    sea_query::{Expr, LikeExpr, Query, SelectStatement, SimpleExpr},
};
use uuid::Uuid;

use foodgram_domain::pagination::PageRequest;
use foodgram_recipes_schema::{
    favorites, follows, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    tags, users,
};

use crate::domain::filter::{MembershipFilter, RecipeFilter};
use crate::domain::repository::{
    FollowRepository, IngredientRepository, RecipeRepository, ShoppingListSource, TagRepository,
    ToggleRelation, UserRepository,
};
use crate::domain::types::{
    Ingredient, IngredientAmount, Recipe, RecipeDraft, RecipeIngredient, RecipeMarks,
    RecipePatch, RecipePreview, RelationKind, ShoppingListRow, Tag, User,
};
use crate::error::RecipesServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RecipesServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, RecipesServiceError> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Username.eq(username)),
            )
            .count(&*self.db)
            .await
            .context("check user uniqueness")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), RecipesServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(i16::from(user.role)),
            created_at: Set(user.created_at),
        }
        .insert(&*self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, RecipesServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn followed_among(
        &self,
        follower_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = follows::Entity::find()
            .filter(follows::Column::UserId.eq(follower_id))
            .filter(follows::Column::FollowingId.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("find followed users")?;
        Ok(rows.into_iter().map(|r| r.following_id).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        role: model.role as u8,
        created_at: model.created_at,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: Arc<DatabaseConnection>,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, RecipesServiceError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&*self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RecipesServiceError> {
        let model = tags::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = tags::Entity::find()
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("find tags by ids")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn exists_conflicting(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<bool, RecipesServiceError> {
        let count = tags::Entity::find()
            .filter(
                Condition::any()
                    .add(tags::Column::Name.eq(name))
                    .add(tags::Column::Color.eq(color))
                    .add(tags::Column::Slug.eq(slug)),
            )
            .count(&*self.db)
            .await
            .context("check tag uniqueness")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<Tag, RecipesServiceError> {
        let model = tags::ActiveModel {
            name: Set(name.to_owned()),
            color: Set(color.to_owned()),
            slug: Set(slug.to_owned()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .context("create tag")?;
        Ok(tag_from_model(model))
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

/// `LIKE` pattern matching names that begin with `prefix` literally.
fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn name_starts_with(prefix: &str) -> SimpleExpr {
    Expr::col((ingredients::Entity, ingredients::Column::Name))
        .like(LikeExpr::new(like_prefix_pattern(prefix)).escape('\\'))
}

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: Arc<DatabaseConnection>,
}

impl IngredientRepository for DbIngredientRepository {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, RecipesServiceError> {
        let mut query = ingredients::Entity::find();
        if let Some(prefix) = name_prefix {
            query = query.filter(name_starts_with(prefix));
        }
        let models = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id)
            .all(&*self.db)
            .await
            .context("list ingredients")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, RecipesServiceError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Ingredient>, RecipesServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("find ingredients by ids")?;
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn get_or_create(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<(Ingredient, bool), RecipesServiceError> {
        let existing = ingredients::Entity::find()
            .filter(ingredients::Column::Name.eq(name))
            .filter(ingredients::Column::MeasurementUnit.eq(measurement_unit))
            .one(&*self.db)
            .await
            .context("find ingredient by name and unit")?;
        if let Some(model) = existing {
            return Ok((ingredient_from_model(model), false));
        }
        let model = ingredients::ActiveModel {
            name: Set(name.to_owned()),
            measurement_unit: Set(measurement_unit.to_owned()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .context("create ingredient")?;
        Ok((ingredient_from_model(model), true))
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: Arc<DatabaseConnection>,
}

/// `recipes.id IN (...)` or `NOT IN (...)` over a `(user_id, recipe_id)` table.
fn membership_expr<E>(
    table: E,
    user_col: E::Column,
    recipe_col: E::Column,
    membership: MembershipFilter,
) -> SimpleExpr
where
    E: EntityTrait,
{
    let members: SelectStatement = Query::select()
        .column(recipe_col)
        .from(table)
        .and_where(Expr::col(user_col).eq(membership.user_id))
        .to_owned();
    if membership.include {
        recipes::Column::Id.in_subquery(members)
    } else {
        recipes::Column::Id.not_in_subquery(members)
    }
}

/// Translate a [`RecipeFilter`] into a WHERE condition on `recipes`.
pub(crate) fn recipe_condition(filter: &RecipeFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(author) = filter.author {
        cond = cond.add(recipes::Column::AuthorId.eq(author));
    }
    if !filter.tags.is_empty() {
        let tagged = Query::select()
            .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
            .from(recipe_tags::Entity)
            .inner_join(
                tags::Entity,
                Expr::col((tags::Entity, tags::Column::Id))
                    .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
            )
            .and_where(Expr::col((tags::Entity, tags::Column::Slug)).is_in(filter.tags.clone()))
            .to_owned();
        cond = cond.add(recipes::Column::Id.in_subquery(tagged));
    }
    if let Some(membership) = filter.favorited {
        cond = cond.add(membership_expr(
            favorites::Entity,
            favorites::Column::UserId,
            favorites::Column::RecipeId,
            membership,
        ));
    }
    if let Some(membership) = filter.in_shopping_cart {
        cond = cond.add(membership_expr(
            shopping_carts::Entity,
            shopping_carts::Column::UserId,
            shopping_carts::Column::RecipeId,
            membership,
        ));
    }
    cond
}

/// Clear and reinsert the tag and ingredient sets of a recipe.
async fn replace_links<C: ConnectionTrait>(
    conn: &C,
    recipe_id: i32,
    tag_ids: &[i32],
    lines: &[IngredientAmount],
) -> Result<(), DbErr> {
    recipe_tags::Entity::delete_many()
        .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;
    recipe_ingredients::Entity::delete_many()
        .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    if !tag_ids.is_empty() {
        recipe_tags::Entity::insert_many(tag_ids.iter().map(|&tag_id| {
            recipe_tags::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(tag_id),
            }
        }))
        .exec_without_returning(conn)
        .await?;
    }
    if !lines.is_empty() {
        recipe_ingredients::Entity::insert_many(lines.iter().map(|line| {
            recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                amount: Set(line.amount),
            }
        }))
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

impl DbRecipeRepository {
    /// Load the tag and ingredient sets for a page of recipe rows.
    async fn hydrate(&self, models: Vec<recipes::Model>) -> Result<Vec<Recipe>, RecipesServiceError> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let tag_rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.clone()))
            .find_also_related(tags::Entity)
            .order_by_asc(recipe_tags::Column::TagId)
            .all(&*self.db)
            .await
            .context("load recipe tags")?;
        let ingredient_rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids))
            .find_also_related(ingredients::Entity)
            .order_by_asc(recipe_ingredients::Column::IngredientId)
            .all(&*self.db)
            .await
            .context("load recipe ingredients")?;

        Ok(models
            .into_iter()
            .map(|m| Recipe {
                tags: tag_rows
                    .iter()
                    .filter(|(link, _)| link.recipe_id == m.id)
                    .filter_map(|(_, tag)| tag.clone().map(tag_from_model))
                    .collect(),
                ingredients: ingredient_rows
                    .iter()
                    .filter(|(link, _)| link.recipe_id == m.id)
                    .filter_map(|(link, ingredient)| {
                        ingredient.clone().map(|i| RecipeIngredient {
                            ingredient: ingredient_from_model(i),
                            amount: link.amount,
                        })
                    })
                    .collect(),
                id: m.id,
                author_id: m.author_id,
                name: m.name,
                text: m.text,
                cooking_time: m.cooking_time,
                image: m.image,
                pub_date: m.pub_date,
            })
            .collect())
    }
}

impl RecipeRepository for DbRecipeRepository {
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, RecipesServiceError> {
        let models = recipes::Entity::find()
            .filter(recipe_condition(filter))
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .context("list recipes")?;
        self.hydrate(models).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, RecipesServiceError> {
        let Some(model) = recipes::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .context("find recipe by id")?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    async fn exists(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let count = recipes::Entity::find_by_id(id)
            .count(&*self.db)
            .await
            .context("check recipe exists")?;
        Ok(count > 0)
    }

    async fn create(
        &self,
        author_id: Uuid,
        draft: &RecipeDraft,
    ) -> Result<i32, RecipesServiceError> {
        let draft = draft.clone();
        let id = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                Box::pin(async move {
                    let recipe = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(draft.name),
                        text: Set(draft.text),
                        cooking_time: Set(draft.cooking_time),
                        image: Set(Some(draft.image)),
                        pub_date: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    replace_links(txn, recipe.id, &draft.tag_ids, &draft.ingredients).await?;
                    Ok(recipe.id)
                })
            })
            .await
            .context("create recipe")?;
        Ok(id)
    }

    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<(), RecipesServiceError> {
        let patch = patch.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Unchanged(id),
                        ..Default::default()
                    };
                    if let Some(name) = patch.name {
                        am.name = Set(name);
                    }
                    if let Some(text) = patch.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = patch.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if let Some(image) = patch.image {
                        am.image = Set(Some(image));
                    }
                    if am.is_changed() {
                        am.update(txn).await?;
                    }
                    replace_links(txn, id, &patch.tag_ids, &patch.ingredients).await
                })
            })
            .await
            .context("update recipe")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, RecipesServiceError> {
        let res = recipes::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .context("delete recipe")?;
        Ok(res.rows_affected > 0)
    }

    async fn previews_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<RecipePreview>, RecipesServiceError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::PubDate)
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let models = query
            .all(&*self.db)
            .await
            .context("list author recipe previews")?;
        Ok(models
            .into_iter()
            .map(|m| RecipePreview {
                id: m.id,
                name: m.name,
                image: m.image,
                cooking_time: m.cooking_time,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RecipesServiceError> {
        let count = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .count(&*self.db)
            .await
            .context("count author recipes")?;
        Ok(count)
    }

    async fn marks(
        &self,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<RecipeMarks, RecipesServiceError> {
        if recipe_ids.is_empty() {
            return Ok(RecipeMarks::default());
        }
        let favorited = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("load favorite marks")?;
        let in_cart = shopping_carts::Entity::find()
            .filter(shopping_carts::Column::UserId.eq(user_id))
            .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(&*self.db)
            .await
            .context("load shopping cart marks")?;
        Ok(RecipeMarks {
            favorited: favorited.into_iter().map(|r| r.recipe_id).collect(),
            in_shopping_cart: in_cart.into_iter().map(|r| r.recipe_id).collect(),
        })
    }
}

// ── Favorite / shopping cart toggles ─────────────────────────────────────────

async fn recipe_exists(db: &DatabaseConnection, recipe_id: i32) -> Result<bool, RecipesServiceError> {
    let count = recipes::Entity::find_by_id(recipe_id)
        .count(db)
        .await
        .context("check relation target recipe")?;
    Ok(count > 0)
}

/// Repository over one of the `(user_id, recipe_id)` marker tables.
macro_rules! user_recipe_repository {
    ($repo:ident, $table:ident, $kind:expr, $label:literal) => {
        #[derive(Clone)]
        pub struct $repo {
            pub db: Arc<DatabaseConnection>,
        }

        impl ToggleRelation for $repo {
            type Target = i32;

            fn kind(&self) -> RelationKind {
                $kind
            }

            async fn target_exists(&self, recipe_id: i32) -> Result<bool, RecipesServiceError> {
                recipe_exists(&self.db, recipe_id).await
            }

            async fn exists(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
                let count = $table::Entity::find_by_id((user_id, recipe_id))
                    .count(&*self.db)
                    .await
                    .context(concat!("check ", $label, " entry"))?;
                Ok(count > 0)
            }

            async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<(), RecipesServiceError> {
                $table::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                }
                .insert(&*self.db)
                .await
                .context(concat!("insert ", $label, " entry"))?;
                Ok(())
            }

            async fn remove(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, RecipesServiceError> {
                let res = $table::Entity::delete_by_id((user_id, recipe_id))
                    .exec(&*self.db)
                    .await
                    .context(concat!("delete ", $label, " entry"))?;
                Ok(res.rows_affected > 0)
            }
        }
    };
}

user_recipe_repository!(
    DbFavoriteRepository,
    favorites,
    RelationKind::Favorite,
    "favorite"
);
user_recipe_repository!(
    DbShoppingCartRepository,
    shopping_carts,
    RelationKind::ShoppingCart,
    "shopping cart"
);

#[derive(Debug, FromQueryResult)]
struct ShoppingListQueryRow {
    name: String,
    measurement_unit: String,
    amount: i64,
}

impl ShoppingListSource for DbShoppingCartRepository {
    async fn shopping_list_rows(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ShoppingListRow>, RecipesServiceError> {
        let carted = Query::select()
            .column(shopping_carts::Column::RecipeId)
            .from(shopping_carts::Entity)
            .and_where(Expr::col(shopping_carts::Column::UserId).eq(user_id))
            .to_owned();

        let rows = recipe_ingredients::Entity::find()
            .select_only()
            .column_as(ingredients::Column::Name, "name")
            .column_as(ingredients::Column::MeasurementUnit, "measurement_unit")
            .column_as(
                Expr::col((recipe_ingredients::Entity, recipe_ingredients::Column::Amount)).sum(),
                "amount",
            )
            .join(JoinType::InnerJoin, recipe_ingredients::Relation::Ingredient.def())
            .filter(recipe_ingredients::Column::RecipeId.in_subquery(carted))
            .group_by(ingredients::Column::Name)
            .group_by(ingredients::Column::MeasurementUnit)
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::MeasurementUnit)
            .into_model::<ShoppingListQueryRow>()
            .all(&*self.db)
            .await
            .context("aggregate shopping cart")?;

        Ok(rows
            .into_iter()
            .map(|r| ShoppingListRow {
                name: r.name,
                measurement_unit: r.measurement_unit,
                amount: r.amount,
            })
            .collect())
    }
}

// ── Follow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ToggleRelation for DbFollowRepository {
    type Target = Uuid;

    fn kind(&self) -> RelationKind {
        RelationKind::Follow
    }

    fn is_self(&self, user_id: Uuid, following_id: Uuid) -> bool {
        user_id == following_id
    }

    async fn target_exists(&self, following_id: Uuid) -> Result<bool, RecipesServiceError> {
        let count = users::Entity::find_by_id(following_id)
            .count(&*self.db)
            .await
            .context("check followed user exists")?;
        Ok(count > 0)
    }

    async fn exists(&self, user_id: Uuid, following_id: Uuid) -> Result<bool, RecipesServiceError> {
        let count = follows::Entity::find_by_id((user_id, following_id))
            .count(&*self.db)
            .await
            .context("check follow")?;
        Ok(count > 0)
    }

    async fn insert(&self, user_id: Uuid, following_id: Uuid) -> Result<(), RecipesServiceError> {
        follows::ActiveModel {
            user_id: Set(user_id),
            following_id: Set(following_id),
        }
        .insert(&*self.db)
        .await
        .context("insert follow")?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, following_id: Uuid) -> Result<bool, RecipesServiceError> {
        let res = follows::Entity::delete_by_id((user_id, following_id))
            .exec(&*self.db)
            .await
            .context("delete follow")?;
        Ok(res.rows_affected > 0)
    }
}

impl FollowRepository for DbFollowRepository {
    async fn list_following(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<User>, RecipesServiceError> {
        let followed = Query::select()
            .column(follows::Column::FollowingId)
            .from(follows::Entity)
            .and_where(Expr::col(follows::Column::UserId).eq(user_id))
            .to_owned();
        let models = users::Entity::find()
            .filter(users::Column::Id.in_subquery(followed))
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .context("list followed users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}
