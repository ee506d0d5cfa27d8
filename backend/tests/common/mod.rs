//! Common test utilities for integration tests
//!
//! Each `TestApp` owns a fresh in-memory store, so tests are isolated and
//! need no external services.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use slimsense_backend::{config::AppConfig, db::Store, routes, state::AppState};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Store,
}

/// A user created through the API
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Store::new();
        let state = AppState::new(store.clone(), config);
        let app = routes::create_router(state);
        Self { app, store }
    }

    async fn send(&self, method: &str, path: &str, body: Option<&Value>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, String) {
        self.send("POST", path, Some(body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, String) {
        self.send("PUT", path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, None).await
    }

    /// Create a user with fake name/email and the given body measurements
    pub async fn create_user(&self, current_weight: f64, target_weight: f64) -> TestUser {
        let email: String = SafeEmail().fake();
        let full_name: String = Name().fake();
        let body = user_payload(&email, &full_name, current_weight, target_weight);

        let (status, response) = self.post("/api/v1/users", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", response);

        let body: Value = serde_json::from_str(&response).unwrap();
        TestUser {
            id: body["id"].as_str().unwrap().to_string(),
            email,
            body,
        }
    }

    /// Create a default test user (male, 180 cm, 90 kg aiming for 80 kg)
    pub async fn create_test_user(&self) -> TestUser {
        self.create_user(90.0, 80.0).await
    }
}

pub fn user_payload(email: &str, full_name: &str, current_weight: f64, target_weight: f64) -> Value {
    json!({
        "email": email,
        "full_name": full_name,
        "gender": "male",
        "age": 35,
        "height_cm": 180.0,
        "activity_level": "moderately active",
        "current_weight": current_weight,
        "target_weight": target_weight
    })
}

pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}
