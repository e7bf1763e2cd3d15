use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::User;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::{CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase};
use foodgram_recipes::usecase::relation::ToggleRelationUseCase;
use foodgram_recipes::usecase::shopping_cart::DownloadShoppingListUseCase;
use foodgram_recipes::usecase::subscription::{GetSubscriptionUseCase, ListSubscriptionsUseCase};

use crate::helpers::{MemoryStore, recipe_input, viewer_of};

async fn create_recipe(
    store: &MemoryStore,
    author: &User,
    name: &str,
    ingredients: Vec<(i32, i64)>,
) -> i32 {
    let tag = store.add_tag(&format!("{name}-tag"));
    CreateRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
    }
    .execute(
        &viewer_of(author),
        recipe_input(name, ingredients, vec![tag.id]),
    )
    .await
    .unwrap()
    .recipe
    .id
}

// ── Favorites ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_show_favorite_flag_after_toggle() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let salt = store.add_ingredient("salt", "g");
    let id = create_recipe(&store, &author, "soup", vec![(salt.id, 5)]).await;

    let favorites = ToggleRelationUseCase {
        repo: store.favorites(),
    };
    let get = GetRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
    };

    favorites.add(fan.id, id).await.unwrap();
    assert!(get.execute(&viewer_of(&fan), id).await.unwrap().is_favorited);
    assert!(!get.execute(&viewer_of(&author), id).await.unwrap().is_favorited);

    let again = favorites.add(fan.id, id).await;
    assert!(matches!(again, Err(RecipesServiceError::FavoriteAlreadyExists)));

    favorites.remove(fan.id, id).await.unwrap();
    assert!(!get.execute(&viewer_of(&fan), id).await.unwrap().is_favorited);
}

#[tokio::test]
async fn should_keep_favorites_and_cart_independent() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    let id = create_recipe(&store, &author, "soup", vec![(salt.id, 5)]).await;

    ToggleRelationUseCase {
        repo: store.carts(),
    }
    .add(author.id, id)
    .await
    .unwrap();

    let result = ToggleRelationUseCase {
        repo: store.favorites(),
    }
    .remove(author.id, id)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::FavoriteNotFound)));

    let view = GetRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
    }
    .execute(&viewer_of(&author), id)
    .await
    .unwrap();
    assert!(view.is_in_shopping_cart);
    assert!(!view.is_favorited);
}

// ── Shopping cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sum_shared_ingredients_across_cart() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    let sugar = store.add_ingredient("sugar", "g");
    let milk = store.add_ingredient("milk", "ml");
    let soup = create_recipe(&store, &author, "soup", vec![(salt.id, 5), (milk.id, 200)]).await;
    let cake = create_recipe(&store, &author, "cake", vec![(salt.id, 10), (sugar.id, 150)]).await;
    create_recipe(&store, &author, "tea", vec![(sugar.id, 20)]).await;

    let cart = ToggleRelationUseCase {
        repo: store.carts(),
    };
    cart.add(author.id, soup).await.unwrap();
    cart.add(author.id, cake).await.unwrap();

    let list = DownloadShoppingListUseCase {
        repo: store.carts(),
    }
    .execute(author.id)
    .await
    .unwrap();

    assert_eq!(
        list.to_string(),
        "Your shopping list:\nmilk 200 ml\nsalt 15 g\nsugar 150 g\n"
    );
}

#[tokio::test]
async fn should_render_header_only_for_empty_cart() {
    let store = MemoryStore::new();
    let shopper = store.add_user("shopper");

    let list = DownloadShoppingListUseCase {
        repo: store.carts(),
    }
    .execute(shopper.id)
    .await
    .unwrap();

    assert!(list.is_empty());
    assert_eq!(list.to_string(), "Your shopping list:\n");
}

#[tokio::test]
async fn should_drop_deleted_recipe_from_cart() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    let id = create_recipe(&store, &author, "soup", vec![(salt.id, 5)]).await;
    ToggleRelationUseCase {
        repo: store.carts(),
    }
    .add(author.id, id)
    .await
    .unwrap();

    DeleteRecipeUseCase { repo: store.clone() }
        .execute(&viewer_of(&author), id)
        .await
        .unwrap();

    let list = DownloadShoppingListUseCase {
        repo: store.carts(),
    }
    .execute(author.id)
    .await
    .unwrap();
    assert!(list.is_empty());

    let result = ToggleRelationUseCase {
        repo: store.carts(),
    }
    .remove(author.id, id)
    .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── Subscriptions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_followed_authors_with_truncated_previews() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let zoe = store.add_user("zoe");
    let adam = store.add_user("adam");
    let salt = store.add_ingredient("salt", "g");
    let mut zoe_recipes = Vec::new();
    for name in ["a", "b", "c"] {
        zoe_recipes.push(create_recipe(&store, &zoe, name, vec![(salt.id, 1)]).await);
    }
    create_recipe(&store, &adam, "d", vec![(salt.id, 1)]).await;

    let follows = ToggleRelationUseCase {
        repo: store.follows(),
    };
    follows.add(reader.id, zoe.id).await.unwrap();
    follows.add(reader.id, adam.id).await.unwrap();

    let subs = ListSubscriptionsUseCase {
        follows: store.follows(),
        recipes: store.clone(),
    }
    .execute(reader.id, PageRequest::default(), Some(2))
    .await
    .unwrap();

    let names: Vec<&str> = subs.iter().map(|s| s.author.user.username.as_str()).collect();
    assert_eq!(names, vec!["adam", "zoe"]);
    assert!(subs.iter().all(|s| s.author.is_subscribed));

    let zoe_sub = &subs[1];
    assert_eq!(zoe_sub.recipes_count, 3);
    let preview_ids: Vec<i32> = zoe_sub.recipes.iter().map(|p| p.id).collect();
    assert_eq!(preview_ids, vec![zoe_recipes[2], zoe_recipes[1]]);
}

#[tokio::test]
async fn should_return_all_previews_without_limit() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    for name in ["a", "b", "c"] {
        create_recipe(&store, &author, name, vec![(salt.id, 1)]).await;
    }

    let sub = GetSubscriptionUseCase {
        users: store.clone(),
        recipes: store.clone(),
    }
    .execute(author.id, None)
    .await
    .unwrap();

    assert_eq!(sub.recipes.len(), 3);
    assert_eq!(sub.recipes_count, 3);
}

#[tokio::test]
async fn should_walk_follow_state_machine() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("chef");
    let follows = ToggleRelationUseCase {
        repo: store.follows(),
    };

    let result = follows.add(reader.id, reader.id).await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::Validation {
            field: "following",
            ..
        })
    ));

    let result = follows.remove(reader.id, author.id).await;
    assert!(matches!(result, Err(RecipesServiceError::FollowNotFound)));

    follows.add(reader.id, author.id).await.unwrap();
    let result = follows.add(reader.id, author.id).await;
    assert!(matches!(result, Err(RecipesServiceError::FollowAlreadyExists)));

    follows.remove(reader.id, author.id).await.unwrap();
    let subs = ListSubscriptionsUseCase {
        follows: store.follows(),
        recipes: store.clone(),
    }
    .execute(reader.id, PageRequest::default(), None)
    .await
    .unwrap();
    assert!(subs.is_empty());
}
