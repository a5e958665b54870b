//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use roster_core::{CreateUser, User, UserStore};
use roster_server::{create_router, services::AuthService, state::AppState};
use roster_storage::LocalUserStore;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Router plus handles on its dependencies
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub store: Arc<LocalUserStore>,
    _temp_dir: TempDir,
}

/// Create a test app backed by a fresh on-disk database with migrations applied
pub async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let pool = roster_storage::create_pool(&db_url).await.unwrap();
    roster_storage::run_migrations(&pool).await.unwrap();
    let store = Arc::new(LocalUserStore::new(pool));

    let auth_service = Arc::new(
        AuthService::new(
            "test-secret-key".to_string(),
            1, // 1 hour access
            1, // 1 day refresh
        )
        .with_hash_cost(4),
    );

    let app_state = AppState::new(store.clone(), Arc::clone(&auth_service));

    TestApp {
        router: create_router(app_state),
        auth_service,
        store,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    /// Insert a user directly through the store
    pub async fn add_user(&self, username: &str, email: &str) -> User {
        self.store
            .create_user(CreateUser::new(username, email), None)
            .await
            .unwrap()
    }

    /// Insert a user that can log in with `password`
    pub async fn add_user_with_password(&self, username: &str, email: &str, password: &str) -> User {
        let hash = self.auth_service.hash_password(password).unwrap();
        self.store
            .create_user(CreateUser::new(username, email), Some(hash))
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn get_with_token(&self, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, serde_json::to_string(body).unwrap()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Raw response body as text
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
