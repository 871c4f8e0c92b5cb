//! Integration tests for API endpoints.
//!
//! These tests drive the full router over in-memory storage, without
//! requiring an actual database connection.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

use user_api::api::{create_router, AppState};
use user_api::domain::{DomainError, DomainResult, HashedPassword, PasswordEncoder};
use user_api::errors::{AppError, AppResult};
use user_api::infra::{HealthCheck, MemoryPersistence};
use user_api::services::{ServiceContainer, Services};

// =============================================================================
// Test Helpers
// =============================================================================

/// Cheap stand-in for Argon2 with the same length rules
struct PlainEncoder;

impl PasswordEncoder for PlainEncoder {
    fn encode(&self, raw_password: &str) -> DomainResult<HashedPassword> {
        let len = raw_password.chars().count();
        if raw_password.trim().is_empty() || !(8..=255).contains(&len) {
            return Err(DomainError::invalid_value("Password length is invalid"));
        }
        HashedPassword::new(format!("plain:{}", raw_password))
    }

    fn matches(&self, raw_password: &str, hashed: &HashedPassword) -> bool {
        hashed.as_str() == format!("plain:{}", raw_password)
    }
}

/// Storage probe that always fails
struct DownStorage;

#[async_trait]
impl HealthCheck for DownStorage {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::internal("connection refused"))
    }
}

fn test_app() -> Router {
    let services = Services::with_persistence(
        Arc::new(MemoryPersistence::new()),
        Arc::new(PlainEncoder),
    );
    create_router(AppState::from_services(&services))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        Some(json!({ "name": name, "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_201_projection() {
    let app = test_app();

    let body = create(&app, "John Doe", "john@example.com").await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@example.com");
    assert!(body.get("password").is_none());

    // yyyy-MM-dd HH:mm:ss
    let created_at = body["createdAt"].as_str().unwrap();
    assert_eq!(created_at.len(), 19);
    assert_eq!(&created_at[10..11], " ");
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/api/users", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Validation Error");

    let errors = body["fieldErrors"].as_array().unwrap();
    let fields: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["email", "name", "password"]);
    assert!(errors.iter().all(|e| e["rejectedValue"] == "null"));
}

#[tokio::test]
async fn test_create_user_field_rules() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "John", "email": "not-an-email", "password": "short" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["fieldErrors"].as_array().unwrap();
    let fields: Vec<_> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["email", "password"]);
    assert_eq!(errors[0]["rejectedValue"], "not-an-email");
}

#[tokio::test]
async fn test_create_user_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Validation Error");
    assert!(body["fieldErrors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = test_app();
    create(&app, "Alice", "a@b.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "Bob", "email": "a@b.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate Email");
}

#[tokio::test]
async fn test_create_user_corporate_name_rule() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({ "name": "John3", "email": "john3@company.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Name Format");

    create(&app, "John3", "john3@gmail.com").await;
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_user() {
    let app = test_app();
    create(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");

    let (status, body) = send(&app, "GET", "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User Not Found");
    assert_eq!(body["message"], "User not found: ID=999");
}

#[tokio::test]
async fn test_list_users() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    create(&app, "Alice", "alice@example.com").await;
    create(&app, "Bob", "bob@example.com").await;

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_user() {
    let app = test_app();
    create(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "name": "Alicia", "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Alicia");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_user_email_conflict_and_missing() {
    let app = test_app();
    create(&app, "Alice", "alice@example.com").await;
    create(&app, "Bob", "bob@example.com").await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({ "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate Email");

    let (status, _) = send(&app, "PUT", "/api/users/42", Some(json!({ "name": "Ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "PUT", "/api/users/1", Some(json!({ "email": "bad" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fieldErrors"][0]["field"], "email");
}

#[tokio::test]
async fn test_update_user_password_bounds() {
    let app = test_app();
    create(&app, "Alice", "alice@example.com").await;

    for password in ["short", ""] {
        let (status, body) = send(
            &app,
            "PUT",
            "/api/users/1",
            Some(json!({ "password": password })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["fieldErrors"][0]["field"], "password");
        assert_eq!(body["fieldErrors"][0]["rejectedValue"], password);
    }
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_user() {
    let app = test_app();
    create(&app, "Alice", "alice@example.com").await;

    let (status, body) = send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health and Docs
// =============================================================================

#[tokio::test]
async fn test_health_reports_storage() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_health_unavailable_when_storage_down() {
    let services = Services::in_memory();
    let app = create_router(AppState::new(services.users(), Arc::new(DownStorage)));

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"]["status"], "unhealthy");
    assert_eq!(body["storage"]["error"], "Storage is unreachable");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users/{id}"].is_object());
}
