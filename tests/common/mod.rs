//! Test helpers for API and service tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::{json, Value};

use mailbox::web::handlers::AppState;
use mailbox::web::router::create_router;
use mailbox::{Database, FixedClock, MailboxService, TokenService};

/// Secret shared by every test token service.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// The day every test starts on.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Create a service over a fresh in-memory database with a pinned clock.
pub async fn create_test_service() -> (MailboxService, Arc<FixedClock>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    create_service_for(db)
}

/// Create a service over an existing database with a pinned clock.
pub fn create_service_for(db: Database) -> (MailboxService, Arc<FixedClock>) {
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 900, 7));
    let clock = Arc::new(FixedClock::at_date(start_date()));
    let service = MailboxService::new(db, tokens).with_clock(clock.clone());
    (service, clock)
}

/// Create a test server over the real router.
pub async fn create_test_server() -> (TestServer, Arc<FixedClock>) {
    let (service, clock) = create_test_service().await;
    let tokens = service.tokens().clone();
    let app_state = Arc::new(AppState::new(service, tokens));

    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, clock)
}

/// Register a user, asserting success.
pub async fn signup(server: &TestServer, username: &str, password: &str, nickname: &str) {
    server
        .post("/auth/signup")
        .json(&json!({
            "username": username,
            "password": password,
            "nickname": nickname
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

/// Log in and return the response body.
pub async fn login(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Register, log in and return the access token.
pub async fn access_token_for(server: &TestServer, username: &str) -> String {
    signup(server, username, "pw", username).await;
    login(server, username, "pw").await["accessToken"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Write a letter as `token`'s user and return the response body.
pub async fn write_letter(server: &TestServer, token: &str, content: &str) -> Value {
    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({ "content": content }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
