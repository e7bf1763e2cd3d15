use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::filter::RecipeFilter;
use foodgram_recipes::domain::types::{RecipeView, User, Viewer};
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    RecipePatchInput, UpdateRecipeUseCase,
};
use foodgram_recipes::usecase::relation::ToggleRelationUseCase;

use crate::helpers::{MemoryStore, admin_viewer, recipe_input, viewer_of};

fn create_uc(
    store: &MemoryStore,
) -> CreateRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    CreateRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
    }
}

fn update_uc(
    store: &MemoryStore,
) -> UpdateRecipeUseCase<MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    UpdateRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
    }
}

fn list_uc(store: &MemoryStore) -> ListRecipesUseCase<MemoryStore, MemoryStore> {
    ListRecipesUseCase {
        recipes: store.clone(),
        users: store.clone(),
    }
}

/// One recipe per tag slug, created in order, each using a single pantry ingredient.
async fn seed_tagged(store: &MemoryStore, author: &User, slugs: &[&str]) -> Vec<i32> {
    let salt = store.add_ingredient("salt", "g");
    let mut ids = Vec::new();
    for slug in slugs {
        let tag = store.add_tag(slug);
        let view = create_uc(store)
            .execute(
                &viewer_of(author),
                recipe_input(&format!("{slug} dish"), vec![(salt.id, 1)], vec![tag.id]),
            )
            .await
            .unwrap();
        ids.push(view.recipe.id);
    }
    ids
}

fn ids(views: &[RecipeView]) -> Vec<i32> {
    views.iter().map(|v| v.recipe.id).collect()
}

// ── CreateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_tags_and_ingredient_lines() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let flour = store.add_ingredient("flour", "g");
    let milk = store.add_ingredient("milk", "ml");
    let breakfast = store.add_tag("breakfast");

    let view = create_uc(&store)
        .execute(
            &viewer_of(&author),
            recipe_input(
                "Pancakes",
                vec![(flour.id, 200), (milk.id, 300)],
                vec![breakfast.id],
            ),
        )
        .await
        .unwrap();

    assert_eq!(view.recipe.name, "Pancakes");
    assert_eq!(view.recipe.author_id, author.id);
    assert_eq!(view.recipe.tags, vec![breakfast]);
    let lines: Vec<(&str, i16)> = view
        .recipe
        .ingredients
        .iter()
        .map(|l| (l.ingredient.name.as_str(), l.amount))
        .collect();
    assert_eq!(lines, vec![("flour", 200), ("milk", 300)]);
    assert_eq!(view.author.user.id, author.id);
    assert!(!view.author.is_subscribed);
    assert!(!view.is_favorited);
    assert!(!view.is_in_shopping_cart);
}

#[tokio::test]
async fn should_reject_anonymous_author() {
    let store = MemoryStore::new();
    let salt = store.add_ingredient("salt", "g");
    let tag = store.add_tag("dinner");

    let result = create_uc(&store)
        .execute(
            &Viewer::Anonymous,
            recipe_input("Soup", vec![(salt.id, 1)], vec![tag.id]),
        )
        .await;

    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));
}

#[tokio::test]
async fn should_validate_fields_before_looking_up_references() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let mut input = recipe_input("Soup", vec![(999, 1)], vec![999]);
    input.cooking_time = 0;

    let result = create_uc(&store).execute(&viewer_of(&author), input).await;

    assert!(
        matches!(
            result,
            Err(RecipesServiceError::Validation {
                field: "cooking_time",
                ..
            })
        ),
        "expected cooking_time validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_ingredient_and_tag_without_storing() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    let tag = store.add_tag("dinner");

    let result = create_uc(&store)
        .execute(
            &viewer_of(&author),
            recipe_input("Soup", vec![(999, 1)], vec![tag.id]),
        )
        .await;
    assert!(matches!(result, Err(RecipesServiceError::IngredientNotFound)));

    let result = create_uc(&store)
        .execute(
            &viewer_of(&author),
            recipe_input("Soup", vec![(salt.id, 1)], vec![999]),
        )
        .await;
    assert!(matches!(result, Err(RecipesServiceError::TagNotFound)));

    assert!(store.lock().recipes.is_empty());
}

// ── UpdateRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_ingredients_and_tags_on_update() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let salt = store.add_ingredient("salt", "g");
    let sugar = store.add_ingredient("sugar", "g");
    let flour = store.add_ingredient("flour", "g");
    let breakfast = store.add_tag("breakfast");
    let lunch = store.add_tag("lunch");

    let created = create_uc(&store)
        .execute(
            &viewer_of(&author),
            recipe_input(
                "Porridge",
                vec![(salt.id, 5), (sugar.id, 10)],
                vec![breakfast.id],
            ),
        )
        .await
        .unwrap();

    let updated = update_uc(&store)
        .execute(
            &viewer_of(&author),
            created.recipe.id,
            RecipePatchInput {
                name: Some("Bread".to_owned()),
                ingredients: Some(vec![(flour.id, 500)]),
                tags: Some(vec![lunch.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.recipe.name, "Bread");
    assert_eq!(updated.recipe.text, created.recipe.text);
    assert_eq!(updated.recipe.cooking_time, created.recipe.cooking_time);
    assert_eq!(updated.recipe.tags, vec![lunch]);
    assert_eq!(updated.recipe.ingredients.len(), 1);
    assert_eq!(updated.recipe.ingredients[0].ingredient, flour);
    assert_eq!(updated.recipe.ingredients[0].amount, 500);
}

#[tokio::test]
async fn should_require_ingredient_and_tag_sets_on_update() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let id = seed_tagged(&store, &author, &["breakfast"]).await[0];

    let result = update_uc(&store)
        .execute(
            &viewer_of(&author),
            id,
            RecipePatchInput {
                name: Some("Renamed".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RecipesServiceError::Validation {
            field: "ingredients",
            ..
        })
    ));
}

#[tokio::test]
async fn should_check_existence_then_permission_before_validation() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let stranger = store.add_user("stranger");
    let id = seed_tagged(&store, &author, &["breakfast"]).await[0];

    let result = update_uc(&store)
        .execute(&viewer_of(&stranger), 999, RecipePatchInput::default())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));

    let result = update_uc(&store)
        .execute(&viewer_of(&stranger), id, RecipePatchInput::default())
        .await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));
}

#[tokio::test]
async fn should_let_admin_edit_any_recipe() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let id = seed_tagged(&store, &author, &["breakfast"]).await[0];
    let recipe = store.lock().recipes[0].clone();

    let updated = update_uc(&store)
        .execute(
            &admin_viewer(),
            id,
            RecipePatchInput {
                cooking_time: Some(90),
                ingredients: Some(
                    recipe
                        .ingredients
                        .iter()
                        .map(|l| (l.ingredient.id, i64::from(l.amount)))
                        .collect(),
                ),
                tags: Some(recipe.tags.iter().map(|t| t.id).collect()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.recipe.cooking_time, 90);
    assert_eq!(updated.recipe.author_id, author.id);
}

// ── DeleteRecipeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_recipe_with_its_favorites() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let id = seed_tagged(&store, &author, &["breakfast"]).await[0];
    ToggleRelationUseCase {
        repo: store.favorites(),
    }
    .add(fan.id, id)
    .await
    .unwrap();

    let uc = DeleteRecipeUseCase { repo: store.clone() };
    let result = uc.execute(&viewer_of(&fan), id).await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));

    uc.execute(&viewer_of(&author), id).await.unwrap();
    assert!(store.lock().recipes.is_empty());
    assert!(store.lock().favorites.is_empty());

    let get = GetRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
    };
    let result = get.execute(&Viewer::Anonymous, id).await;
    assert!(matches!(result, Err(RecipesServiceError::RecipeNotFound)));
}

// ── ListRecipesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_match_any_requested_tag_newest_first() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let ids_by_tag = seed_tagged(&store, &author, &["breakfast", "lunch", "dinner"]).await;

    let filter = RecipeFilter::new(
        &Viewer::Anonymous,
        None,
        vec!["breakfast".to_owned(), "lunch".to_owned()],
        None,
        None,
    );
    let views = list_uc(&store)
        .execute(&Viewer::Anonymous, &filter, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(ids(&views), vec![ids_by_tag[1], ids_by_tag[0]]);
}

#[tokio::test]
async fn should_filter_by_author() {
    let store = MemoryStore::new();
    let first = store.add_user("first");
    let second = store.add_user("second");
    seed_tagged(&store, &first, &["breakfast"]).await;
    let mine = seed_tagged(&store, &second, &["lunch"]).await;

    let filter = RecipeFilter::new(&Viewer::Anonymous, Some(second.id), vec![], None, None);
    let views = list_uc(&store)
        .execute(&Viewer::Anonymous, &filter, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(ids(&views), mine);
}

#[tokio::test]
async fn should_filter_by_favorites_for_signed_in_viewer_only() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let recipe_ids = seed_tagged(&store, &author, &["breakfast", "lunch"]).await;
    ToggleRelationUseCase {
        repo: store.favorites(),
    }
    .add(fan.id, recipe_ids[0])
    .await
    .unwrap();

    let viewer = viewer_of(&fan);
    let favorites = RecipeFilter::new(&viewer, None, vec![], Some(true), None);
    let views = list_uc(&store)
        .execute(&viewer, &favorites, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(ids(&views), vec![recipe_ids[0]]);
    assert!(views[0].is_favorited);

    let others = RecipeFilter::new(&viewer, None, vec![], Some(false), None);
    let views = list_uc(&store)
        .execute(&viewer, &others, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(ids(&views), vec![recipe_ids[1]]);
    assert!(!views[0].is_favorited);

    let anonymous = RecipeFilter::new(&Viewer::Anonymous, None, vec![], Some(true), None);
    let views = list_uc(&store)
        .execute(&Viewer::Anonymous, &anonymous, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(views.len(), 2);
}

#[tokio::test]
async fn should_paginate_recipe_list() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let slugs: Vec<String> = (0..8).map(|i| format!("tag-{i}")).collect();
    let slug_refs: Vec<&str> = slugs.iter().map(String::as_str).collect();
    let recipe_ids = seed_tagged(&store, &author, &slug_refs).await;

    let page = PageRequest::from_query(Some(2), Some(6));
    let views = list_uc(&store)
        .execute(&Viewer::Anonymous, &RecipeFilter::default(), page)
        .await
        .unwrap();

    assert_eq!(ids(&views), vec![recipe_ids[1], recipe_ids[0]]);
}

#[tokio::test]
async fn should_mark_author_as_subscribed_for_follower() {
    let store = MemoryStore::new();
    let author = store.add_user("chef");
    let fan = store.add_user("fan");
    let id = seed_tagged(&store, &author, &["breakfast"]).await[0];
    ToggleRelationUseCase {
        repo: store.follows(),
    }
    .add(fan.id, author.id)
    .await
    .unwrap();

    let get = GetRecipeUseCase {
        recipes: store.clone(),
        users: store.clone(),
    };
    let as_fan = get.execute(&viewer_of(&fan), id).await.unwrap();
    assert!(as_fan.author.is_subscribed);

    let as_anonymous = get.execute(&Viewer::Anonymous, id).await.unwrap();
    assert!(!as_anonymous.author.is_subscribed);
}
