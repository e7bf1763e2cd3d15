user_recipe_entity!(
    "shopping_carts",
    "Recipe whose ingredients a user intends to buy."
);
