//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Duration;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::{AppState, build_app};
use storefront_auth::{ManualClock, TokenManager};
use storefront_core::config::AppConfig;
use storefront_core::config::auth::AuthConfig;
use storefront_database::{MemoryUserRepository, UserRepository};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct repository access
    pub state: AppState,
    /// Clock driving token timestamps
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a new test application with an empty user store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.jwt_expiration_minutes = 60;

        let clock = Arc::new(ManualClock::default());
        let user_repo: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
        let state = AppState::with_clock(config, user_repo, clock.clone())
            .expect("Failed to build app state");

        Self {
            router: build_app(state.clone()),
            state,
            clock,
        }
    }

    /// Move token time forward
    pub fn advance_clock(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// A token manager sharing this app's clock but signing with `secret`
    pub fn foreign_token_manager(&self, secret: &str) -> TokenManager {
        let config = AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        };
        TokenManager::with_clock(&config, self.clock.clone()).expect("Failed to build token manager")
    }

    /// Register a user through the API and return the response
    pub async fn register(&self, email: &str, password: &str, role: Option<&str>) -> TestResponse {
        let mut body = json!({
            "email": email,
            "password": password,
            "first_name": "Test",
            "last_name": "User",
        });
        if let Some(role) = role {
            body["role"] = json!(role);
        }

        self.request("POST", "/api/auth/register", Some(body), None)
            .await
    }

    /// Register a user and return its id
    pub async fn create_test_user(&self, email: &str, password: &str, role: &str) -> Uuid {
        let response = self.register(email, password, Some(role)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("Registration response without user id")
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("Login response without token")
            .to_string()
    }

    /// Send a JSON request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        match token {
            Some(token) => {
                self.request_with_auth_header(method, path, body, Some(&format!("Bearer {token}")))
                    .await
            }
            None => self.request_with_auth_header(method, path, body, None).await,
        }
    }

    /// Send a request with a raw `Authorization` header value
    pub async fn request_with_auth_header(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
