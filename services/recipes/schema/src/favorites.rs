user_recipe_entity!("favorites", "Recipe marked as a favorite by a user.");
