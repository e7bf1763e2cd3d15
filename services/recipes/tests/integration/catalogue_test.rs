use foodgram_domain::pagination::PageRequest;
use foodgram_recipes::domain::types::Viewer;
use foodgram_recipes::error::RecipesServiceError;
use foodgram_recipes::usecase::ingredient::{
    IngredientInput, ListIngredientsUseCase, LoadIngredientsUseCase, LoadReport,
};
use foodgram_recipes::usecase::relation::ToggleRelationUseCase;
use foodgram_recipes::usecase::tag::{CreateTagInput, CreateTagUseCase, ListTagsUseCase};
use foodgram_recipes::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
};

use crate::helpers::{MemoryStore, admin_viewer, viewer_of};

fn ingredient(name: &str, unit: &str) -> IngredientInput {
    IngredientInput {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

fn registration(username: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Vasya".to_owned(),
        last_name: "Pupkin".to_owned(),
    }
}

// ── Ingredients ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_load_ingredient_file_idempotently() {
    let store = MemoryStore::new();
    let uc = LoadIngredientsUseCase { repo: store.clone() };
    let items = vec![
        ingredient("salt", "g"),
        ingredient("milk", "ml"),
        ingredient("salt", "g"),
    ];

    let first = uc.execute(items.clone()).await.unwrap();
    assert_eq!(
        first,
        LoadReport {
            created: 2,
            existing: 1
        }
    );

    let second = uc.execute(items).await.unwrap();
    assert_eq!(
        second,
        LoadReport {
            created: 0,
            existing: 3
        }
    );
    assert_eq!(store.lock().ingredients.len(), 2);
}

#[tokio::test]
async fn should_search_ingredients_by_name_prefix() {
    let store = MemoryStore::new();
    store.add_ingredient("sugar", "g");
    store.add_ingredient("salt", "g");
    store.add_ingredient("milk", "ml");
    let uc = ListIngredientsUseCase { repo: store.clone() };

    let names = |list: Vec<foodgram_recipes::domain::types::Ingredient>| -> Vec<String> {
        list.into_iter().map(|i| i.name).collect()
    };
    assert_eq!(names(uc.execute(Some("s")).await.unwrap()), vec!["salt", "sugar"]);
    assert_eq!(names(uc.execute(Some("")).await.unwrap()).len(), 3);
    assert!(uc.execute(Some("z")).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_treat_wildcards_in_prefix_literally() {
    let store = MemoryStore::new();
    store.add_ingredient("50g butter", "g");
    store.add_ingredient("50_ tortillas", "pcs");
    store.add_ingredient("%milk", "ml");
    let uc = ListIngredientsUseCase { repo: store.clone() };

    let found = uc.execute(Some("50_")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "50_ tortillas");

    let found = uc.execute(Some("%")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "%milk");
}

// ── Tags ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_tags_as_admin_only() {
    let store = MemoryStore::new();
    let user = store.add_user("chef");
    let uc = CreateTagUseCase { repo: store.clone() };
    let input = || CreateTagInput {
        name: "Breakfast".to_owned(),
        color: "#E26C2D".to_owned(),
        slug: "breakfast".to_owned(),
    };

    let result = uc.execute(&viewer_of(&user), input()).await;
    assert!(matches!(result, Err(RecipesServiceError::Forbidden)));

    let tag = uc.execute(&admin_viewer(), input()).await.unwrap();
    assert_eq!(tag.color, "#e26c2d");

    let result = uc.execute(&admin_viewer(), input()).await;
    assert!(matches!(result, Err(RecipesServiceError::TagAlreadyExists)));

    let tags = ListTagsUseCase { repo: store.clone() }.execute().await.unwrap();
    assert_eq!(tags, vec![tag]);
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_once() {
    let store = MemoryStore::new();
    let uc = RegisterUserUseCase { repo: store.clone() };

    let user = uc.execute(registration("vasya")).await.unwrap();
    assert_eq!(user.username, "vasya");

    let result = uc.execute(registration("vasya")).await;
    assert!(matches!(result, Err(RecipesServiceError::UserAlreadyExists)));

    let mut bad = registration("petya");
    bad.email = "not-an-email".to_owned();
    let result = uc.execute(bad).await;
    assert!(matches!(
        result,
        Err(RecipesServiceError::Validation { field: "email", .. })
    ));
}

#[tokio::test]
async fn should_list_users_with_subscription_flag() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    ToggleRelationUseCase {
        repo: store.follows(),
    }
    .add(reader.id, author.id)
    .await
    .unwrap();

    let views = ListUsersUseCase { repo: store.clone() }
        .execute(&viewer_of(&reader), PageRequest::default())
        .await
        .unwrap();
    let flags: Vec<(&str, bool)> = views
        .iter()
        .map(|v| (v.user.username.as_str(), v.is_subscribed))
        .collect();
    assert_eq!(flags, vec![("author", true), ("reader", false)]);

    let view = GetUserUseCase { repo: store.clone() }
        .execute(&Viewer::Anonymous, author.id)
        .await
        .unwrap();
    assert!(!view.is_subscribed);
}
