use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `favorites` and `shopping_carts` share one shape: a (user, recipe) marker row.
fn user_recipe_table(table: UserRecipeTable) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(UserRecipe::UserId).uuid().not_null())
        .col(ColumnDef::new(UserRecipe::RecipeId).integer().not_null())
        .primary_key(
            Index::create()
                .col(UserRecipe::UserId)
                .col(UserRecipe::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, UserRecipe::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, UserRecipe::RecipeId)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(user_recipe_table(UserRecipeTable::Favorites))
            .await?;
        manager
            .create_table(user_recipe_table(UserRecipeTable::ShoppingCarts))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRecipeTable::ShoppingCarts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRecipeTable::Favorites).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum UserRecipeTable {
    Favorites,
    ShoppingCarts,
}

#[derive(Iden)]
enum UserRecipe {
    UserId,
    RecipeId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
