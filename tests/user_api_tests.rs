//! User API integration tests

use std::sync::{Arc, Once};

use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use tempfile::TempDir;

use venuetrack::config::init_config;
use venuetrack::runtime::lifetime::startup::StartupContext;
use venuetrack::runtime::modes::server::configure_app;
use venuetrack::services::UserService;
use venuetrack::storage::{PoolSettings, SeaOrmStorage};

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_context() -> (StartupContext, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("users.db").display()
    );
    let storage = SeaOrmStorage::new(&db_url, &PoolSettings::default())
        .await
        .expect("Failed to create storage");

    (StartupContext::from_storage(Arc::new(storage)), temp_dir)
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(App::new().configure(|cfg| configure_app(cfg, &$ctx, "/api"))).await
    };
}

macro_rules! post_user {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_rt::test]
async fn test_create_user_returns_201() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = post_user!(
        app,
        json!({"name": "  Ada ", "last_name": "Lovelace", "email": "Ada@Example.com"})
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["last_name"], "Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["id"].as_i64().is_some());
    assert!(body["data"]["createdAt"].as_str().is_some());
}

#[actix_rt::test]
async fn test_duplicate_email_is_409() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, _) = post_user!(app, json!({"name": "Ada", "email": "ada@example.com"}));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_user!(app, json!({"name": "Other", "email": "ADA@example.com"}));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("ada@example.com"));
}

#[actix_rt::test]
async fn test_invalid_user_is_400() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = post_user!(app, json!({"name": "", "email": "ada@example.com"}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, _) = post_user!(app, json!({"name": "Ada", "email": "not-an-email"}));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_malformed_json_is_400() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[actix_rt::test]
async fn test_users_are_listed_newest_first() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    for (name, email) in [
        ("First", "first@example.com"),
        ("Second", "second@example.com"),
        ("Third", "third@example.com"),
    ] {
        let (status, _) = post_user!(app, json!({"name": name, "email": email}));
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Users retrieved successfully");

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[actix_rt::test]
async fn test_demo_user_seed_is_idempotent() {
    let (ctx, _dir) = create_context().await;
    let service = UserService::new(ctx.storage.clone());

    assert_eq!(service.seed_demo_users().await.unwrap(), 3);
    assert_eq!(service.seed_demo_users().await.unwrap(), 3);

    let users = service.list().await.unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().any(|u| u.email == "jane.smith@example.com"));
}
