//! Integration tests for the user endpoints.
//!
//! The real router runs against a fresh in-memory repository per test.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{User, UserId, UserInput};
use user_service_lib::repository::{InMemoryUserStore, UserRepository};

const KEY: &str = "test-key";

fn app() -> Router {
    user_service_lib::app(Arc::new(InMemoryUserStore::new()), KEY)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-KEY", key);
    }
    let request = match body {
        Some(raw) => builder
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create(app: &Router, name: &str, email: &str, age: i32) -> i64 {
    let body = json!({ "name": name, "email": email, "age": age }).to_string();
    let (status, created) = send(app, Method::POST, "/users", Some(KEY), Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_user_lifecycle() {
    let app = app();

    let id = create(&app, "Alikhan", "a@b.com", 30).await;
    assert_eq!(id, 1);

    let (status, user) = send(&app, Method::GET, "/users/1", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Alikhan");
    assert_eq!(user["email"], "a@b.com");
    assert_eq!(user["age"], 30);
    assert!(user["created_at"].is_string());

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/1",
        Some(KEY),
        Some(r#"{"name":"Ali","email":"ali@b.com","age":31}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "user updated successfully" }));

    let (_, user) = send(&app, Method::GET, "/users/1", Some(KEY), None).await;
    assert_eq!(user["name"], "Ali");
    assert_eq!(user["age"], 31);

    let (status, body) = send(&app, Method::DELETE, "/users/1", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "user deleted successfully", "rows_affected": 1 })
    );

    let (status, body) = send(&app, Method::GET, "/users/1", Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "user 1 not found" }));
}

#[tokio::test]
async fn test_list_users_in_id_order() {
    let app = app();
    create(&app, "Ali", "a@b.com", 30).await;
    create(&app, "Dana", "d@b.com", 25).await;

    let (status, body) = send(&app, Method::GET, "/users", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ali", "Dana"]);
}

#[tokio::test]
async fn test_patch_is_full_replacement() {
    let app = app();
    create(&app, "Ali", "a@b.com", 30).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/1",
        Some(KEY),
        Some(r#"{"name":"Ali"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email is required" }));
}

#[tokio::test]
async fn test_create_validation_messages() {
    let app = app();

    for (body, message) in [
        (r#"{"email":"a@b.com","age":30}"#, "name is required"),
        (r#"{"name":"  ","email":"a@b.com","age":30}"#, "name is required"),
        (r#"{"name":"Ali","age":30}"#, "email is required"),
        (r#"{"name":"Ali","email":"a@b.com","age":0}"#, "age must be positive"),
        (r#"{"name":"Ali","email":"a@b.com"}"#, "age must be positive"),
        ("{not json", "invalid request body"),
    ] {
        let (status, err) = send(&app, Method::POST, "/users", Some(KEY), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(err, json!({ "error": message }));
    }

    let (_, list) = send(&app, Method::GET, "/users", Some(KEY), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let app = app();

    for uri in ["/users/abc", "/users/0", "/users/-1"] {
        let (status, err) = send(&app, Method::GET, uri, Some(KEY), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(err, json!({ "error": "invalid user id" }));
    }

    let (status, _) = send(&app, Method::DELETE, "/users/42", Some(KEY), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/users/42",
        Some(KEY),
        Some(r#"{"name":"Ali","email":"a@b.com","age":30}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_path_is_a_json_error() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/users/%FF", Some(KEY), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "invalid user id" }));
}

#[tokio::test]
async fn test_trailing_slash_after_id() {
    let app = app();
    create(&app, "Ali", "a@b.com", 30).await;

    let (status, user) = send(&app, Method::GET, "/users/1/", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Ali");

    let (status, err) = send(&app, Method::GET, "/users/1/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err, json!({ "error": "missing X-API-KEY header" }));

    let (status, body) = send(&app, Method::DELETE, "/users/1/", Some(KEY), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_affected"], 1);
}

#[tokio::test]
async fn test_update_checks_id_before_body() {
    let app = app();
    let (status, err) = send(&app, Method::PUT, "/users/x", Some(KEY), Some("{bad")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({ "error": "invalid user id" }));
}

#[tokio::test]
async fn test_api_key_messages() {
    let app = app();

    let (status, err) = send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err, json!({ "error": "missing X-API-KEY header" }));

    let body = r#"{"name":"Ali","email":"a@b.com","age":30}"#;
    let (status, err) = send(&app, Method::POST, "/users", Some("nope"), Some(body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err, json!({ "error": "invalid X-API-KEY" }));

    // Rejected requests never reach the store
    let (_, list) = send(&app, Method::GET, "/users", Some(KEY), None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_unsupported_method() {
    let app = app();

    let (status, err) = send(&app, Method::DELETE, "/users", Some(KEY), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(err, json!({ "error": "method not allowed" }));

    let (status, _) = send(&app, Method::POST, "/users/1", Some(KEY), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_and_docs_need_no_key() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{id}"].is_object());
}

/// Repository whose backend is always unreachable
struct Unreachable;

#[async_trait]
impl UserRepository for Unreachable {
    async fn list(&self) -> AppResult<Vec<User>> {
        Err(AppError::Timeout("list users"))
    }

    async fn find_by_id(&self, _id: UserId) -> AppResult<User> {
        Err(AppError::Timeout("get user"))
    }

    async fn create(&self, _input: UserInput) -> AppResult<UserId> {
        Err(AppError::Timeout("create user"))
    }

    async fn update(&self, _id: UserId, _input: UserInput) -> AppResult<()> {
        Err(AppError::Timeout("update user"))
    }

    async fn delete(&self, _id: UserId) -> AppResult<u64> {
        Err(AppError::Timeout("delete user"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Timeout("ping"))
    }
}

#[tokio::test]
async fn test_backend_failure_is_opaque_500() {
    let app = user_service_lib::app(Arc::new(Unreachable), KEY);

    let (status, err) = send(&app, Method::GET, "/users", Some(KEY), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err, json!({ "error": "the database did not respond in time" }));

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}
