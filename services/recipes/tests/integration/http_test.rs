use std::collections::BTreeMap;

use axum::http::{StatusCode, header};
use axum_test::{TestRequest, TestServer};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
use serde_json::{Value as Json, json};

use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_recipes_schema::tags;
use foodgram_testing::auth::MockAuth;

/// Server whose database fails every query. Only requests rejected before
/// touching storage can succeed against it.
fn offline_server() -> TestServer {
    server_with(DatabaseConnection::Disconnected)
}

fn server_with(db: DatabaseConnection) -> TestServer {
    TestServer::new(build_router(AppState::new(db))).unwrap()
}

fn with_auth(mut request: TestRequest, auth: &MockAuth) -> TestRequest {
    for (name, value) in auth.headers().iter() {
        request = request.add_header(name.clone(), value.clone());
    }
    request
}

fn valid_recipe() -> Json {
    json!({
        "ingredients": [{"id": 1, "amount": 10}],
        "tags": [1],
        "image": "data:image/png;base64,iVBORw0KGgo=",
        "name": "Pancakes",
        "text": "Whisk and fry.",
        "cooking_time": 20
    })
}

// ── Probes and identity ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_health_probe() {
    let server = offline_server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_require_identity_for_me() {
    let server = offline_server();
    let response = server.get("/users/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_identity_to_create_recipe() {
    let server = offline_server();
    let response = server.post("/recipes").json(&valid_recipe()).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_out_of_range_cooking_time() {
    let server = offline_server();
    let mut body = valid_recipe();
    body["cooking_time"] = json!(0);

    let response = with_auth(server.post("/recipes").json(&body), &MockAuth::user()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["kind"], "VALIDATION");
    assert_eq!(json["field"], "cooking_time");
}

#[tokio::test]
async fn should_reject_duplicate_ingredient_lines() {
    let server = offline_server();
    let mut body = valid_recipe();
    body["ingredients"] = json!([{"id": 1, "amount": 10}, {"id": 1, "amount": 5}]);

    let response = with_auth(server.post("/recipes").json(&body), &MockAuth::user()).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["field"], "ingredients");
    assert_eq!(json["message"], "ingredient already added");
}

#[tokio::test]
async fn should_report_malformed_body_as_validation_error() {
    let server = offline_server();
    let response = with_auth(
        server.post("/recipes").json(&json!({"name": 42})),
        &MockAuth::user(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["kind"], "VALIDATION");
    assert_eq!(json["field"], "body");
}

#[tokio::test]
async fn should_reject_invalid_list_flag() {
    let server = offline_server();
    let response = server.get("/recipes?is_favorited=maybe").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["field"], "query");
}

#[tokio::test]
async fn should_reject_recipes_limit_beyond_range() {
    let server = offline_server();
    let response = with_auth(
        server.get("/users/subscriptions?recipes_limit=9223372036854775808"),
        &MockAuth::user(),
    )
    .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["kind"], "VALIDATION");
    assert_eq!(json["field"], "query");
}

#[tokio::test]
async fn should_report_bad_paging_params_as_validation_error() {
    let server = offline_server();
    for path in ["/users?limit=many", "/users/subscriptions?page=-1"] {
        let response = with_auth(server.get(path), &MockAuth::user()).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{path}");
        let json: Json = response.json();
        assert_eq!(json["kind"], "VALIDATION", "{path}");
        assert_eq!(json["field"], "query", "{path}");
    }
}

#[tokio::test]
async fn should_refuse_self_subscription() {
    let server = offline_server();
    let me = MockAuth::user();
    let path = format!("/users/{}/subscribe", me.user_id);

    let response = with_auth(server.post(&path), &me).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Json = response.json();
    assert_eq!(json["field"], "following");
    assert_eq!(json["message"], "you cannot follow yourself");
}

#[tokio::test]
async fn should_forbid_tag_creation_for_regular_user() {
    let server = offline_server();
    let body = json!({"name": "Breakfast", "color": "#e26c2d", "slug": "breakfast"});

    let response = with_auth(server.post("/tags").json(&body), &MockAuth::user()).await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let json: Json = response.json();
    assert_eq!(json["kind"], "FORBIDDEN");
}

// ── Reads backed by a mock database ──────────────────────────────────────────

#[tokio::test]
async fn should_render_tag() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tags::Model {
            id: 3,
            name: "Breakfast".to_owned(),
            color: "#e26c2d".to_owned(),
            slug: "breakfast".to_owned(),
        }]])
        .into_connection();
    let server = server_with(db);

    let response = server.get("/tags/3").await;

    response.assert_status_ok();
    let json: Json = response.json();
    assert_eq!(
        json,
        json!({"id": 3, "name": "Breakfast", "color": "#e26c2d", "slug": "breakfast"})
    );
}

#[tokio::test]
async fn should_return_404_for_missing_tag() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<tags::Model>::new()])
        .into_connection();
    let server = server_with(db);

    let response = server.get("/tags/99").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let json: Json = response.json();
    assert_eq!(json["kind"], "TAG_NOT_FOUND");
}

#[tokio::test]
async fn should_download_shopping_list_as_attachment() {
    let row = |name: &str, unit: &str, amount: i64| {
        BTreeMap::from([
            ("name", Value::from(name.to_owned())),
            ("measurement_unit", Value::from(unit.to_owned())),
            ("amount", Value::from(amount)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row("flour", "g", 450), row("milk", "ml", 300)]])
        .into_connection();
    let server = server_with(db);

    let response = with_auth(
        server.get("/recipes/download_shopping_cart"),
        &MockAuth::user(),
    )
    .await;

    response.assert_status_ok();
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_owned();
    assert_eq!(disposition, "attachment; filename=\"shopping_list.txt\"");
    assert_eq!(
        response.text(),
        "Your shopping list:\nflour 450 g\nmilk 300 ml\n"
    );
}
