//! Web API Authentication Tests
//!
//! Integration tests for the signup, login and refresh endpoints.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::{create_test_server, login, signup};
use mailbox::web::middleware::REFRESH_TOKEN_HEADER;
use serde_json::{json, Value};

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_success() {
    let (server, _clock) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "pw",
            "nickname": "Al"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_signup_without_nickname_defaults_to_username() {
    let (server, _clock) = create_test_server().await;

    server
        .post("/auth/signup")
        .json(&json!({ "username": "bob", "password": "pw" }))
        .await
        .assert_status(StatusCode::CREATED);

    let body = login(&server, "bob", "pw").await;
    assert_eq!(body["nickname"], "bob");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;

    let response = server
        .post("/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "other",
            "nickname": "Another"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let (server, _clock) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .json(&json!({ "username": "", "password": "pw" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["username"].is_array());

    let response = server
        .post("/auth/signup")
        .json(&json!({ "username": "a".repeat(33), "password": "pw" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let response = server
        .post("/auth/signup")
        .json(&json!({ "username": "alice", "password": "" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_signup_malformed_json() {
    let (server, _clock) = create_test_server().await;

    let response = server
        .post("/auth/signup")
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;

    let body = login(&server, "alice", "pw").await;
    assert!(body["accessToken"].is_string());
    assert!(body["refreshToken"].is_string());
    assert_eq!(body["nickname"], "Al");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let (server, _clock) = create_test_server().await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "nobody", "password": "pw" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_overlong_unknown_username_is_not_found() {
    let (server, _clock) = create_test_server().await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "a".repeat(40), "password": "pw" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_login_empty_password_is_invalid_credentials() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "username": "alice", "password": "" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_returns_same_refresh_token() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;
    let tokens = login(&server, "alice", "pw").await;
    let refresh_token = tokens["refreshToken"].as_str().unwrap();

    let response = server
        .post("/auth/refresh")
        .add_header(REFRESH_TOKEN_HEADER, refresh_token.to_string())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["refreshToken"], refresh_token);
    assert_eq!(body["nickname"], "Al");

    // The new access token works on a protected route
    let access_token = body["accessToken"].as_str().unwrap();
    server
        .get("/api/letters/today")
        .add_header(AUTHORIZATION, format!("Bearer {}", access_token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_refresh_header_name_is_case_insensitive() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;
    let tokens = login(&server, "alice", "pw").await;

    server
        .post("/auth/refresh")
        .add_header("RefreshToken", tokens["refreshToken"].as_str().unwrap().to_string())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_refresh_missing_header() {
    let (server, _clock) = create_test_server().await;

    server
        .post("/auth/refresh")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_with_tampered_token() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;
    let tokens = login(&server, "alice", "pw").await;
    let tampered = format!("{}x", tokens["refreshToken"].as_str().unwrap());

    server
        .post("/auth/refresh")
        .add_header(REFRESH_TOKEN_HEADER, tampered)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let (server, _clock) = create_test_server().await;
    signup(&server, "alice", "pw", "Al").await;
    let tokens = login(&server, "alice", "pw").await;

    server
        .post("/auth/refresh")
        .add_header(
            REFRESH_TOKEN_HEADER,
            tokens["accessToken"].as_str().unwrap().to_string(),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = axum_test::TestServer::new(mailbox::web::create_health_router()).unwrap();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
