mod common;

use auth::Authenticator;
use auth::SigningConfig;
use bookstore_service::domain::principal::models::EmailAddress;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .register("Alice", "alice@example.com", "correcthorse")
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let response = app
        .register("Alice Again", "Alice@Example.com", "another")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app.register("Alice", "not-an-email", "correcthorse").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_login_and_access_protected_route() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let response = app.login("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body["data"]["expires_at"].is_string());
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);

    let response = app
        .get_authenticated("/api/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["name"], "Alice");
}

#[tokio::test]
async fn test_login_accepts_email_and_password_fields() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "correcthorse"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_look_the_same() {
    let app = TestApp::spawn().await;
    app.register("Real", "real@example.com", "rightpass")
        .await;

    let unknown = app.login("nobody@example.com", "x").await;
    let wrong = app.login("real@example.com", "wrongpass").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown_body: serde_json::Value = unknown.json().await.unwrap();
    let wrong_body: serde_json::Value = wrong.json().await.unwrap();
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(wrong_body["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Missing bearer token");
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/users/me", "garbage-string")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_zero_ttl_token_is_rejected() {
    let app = TestApp::spawn_with_ttl(Duration::zero()).await;
    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let token = app.login_token("alice@example.com", "correcthorse").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let signing = SigningConfig::new("HS256", "a-completely-different-secret-32-bytes").unwrap();
    let forger = Authenticator::new(&signing, Duration::minutes(30));
    let token = forger
        .generate_token("alice@example.com", Utc::now())
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_removed_principal() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "correcthorse")
        .await;

    let token = app
        .authenticator
        .generate_token("alice@example.com", Utc::now())
        .unwrap();

    app.repository
        .remove(&EmailAddress::new("alice@example.com").unwrap())
        .await
        .expect("principal should exist");

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}
