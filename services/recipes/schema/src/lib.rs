//! sea-orm entities for the recipes service database.

/// Declares a `(user_id, recipe_id)` marker table.
///
/// Favorites and shopping carts share this shape but live in independent tables.
macro_rules! user_recipe_entity {
    ($table:tt, $doc:tt) => {
        use sea_orm::entity::prelude::*;

        #[doc = $doc]
        #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
        #[sea_orm(table_name = $table)]
        pub struct Model {
            #[sea_orm(primary_key, auto_increment = false)]
            pub user_id: Uuid,
            #[sea_orm(primary_key, auto_increment = false)]
            pub recipe_id: i32,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {
            #[sea_orm(
                belongs_to = "super::users::Entity",
                from = "Column::UserId",
                to = "super::users::Column::Id",
                on_delete = "Cascade"
            )]
            User,
            #[sea_orm(
                belongs_to = "super::recipes::Entity",
                from = "Column::RecipeId",
                to = "super::recipes::Column::Id",
                on_delete = "Cascade"
            )]
            Recipe,
        }

        impl Related<super::users::Entity> for Entity {
            fn to() -> RelationDef {
                Relation::User.def()
            }
        }

        impl Related<super::recipes::Entity> for Entity {
            fn to() -> RelationDef {
                Relation::Recipe.def()
            }
        }

        impl ActiveModelBehavior for ActiveModel {}
    };
}

pub mod favorites;
pub mod follows;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod shopping_carts;
pub mod tags;
pub mod users;
