use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Recipe list: ORDER BY pub_date DESC, id DESC
        manager
            .create_index(
                Index::create()
                    .name("idx_recipes_pub_date")
                    .table(Recipes::Table)
                    .col((Recipes::PubDate, IndexOrder::Desc))
                    .col((Recipes::Id, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        // Author filter and subscription previews
        manager
            .create_index(
                Index::create()
                    .name("idx_recipes_author_id")
                    .table(Recipes::Table)
                    .col(Recipes::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Shopping list aggregation joins by ingredient
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_ingredients_ingredient_id")
                    .table(RecipeIngredients::Table)
                    .col(RecipeIngredients::IngredientId)
                    .to_owned(),
            )
            .await?;

        // Tag filter
        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_tags_tag_id")
                    .table(RecipeTags::Table)
                    .col(RecipeTags::TagId)
                    .to_owned(),
            )
            .await?;

        // Subscriber lookups for an author
        manager
            .create_index(
                Index::create()
                    .name("idx_follows_following_id")
                    .table(Follows::Table)
                    .col(Follows::FollowingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_follows_following_id",
            "idx_recipe_tags_tag_id",
            "idx_recipe_ingredients_ingredient_id",
            "idx_recipes_author_id",
            "idx_recipes_pub_date",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
    AuthorId,
    PubDate,
}

#[derive(Iden)]
enum RecipeIngredients {
    Table,
    IngredientId,
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    TagId,
}

#[derive(Iden)]
enum Follows {
    Table,
    FollowingId,
}
