/// Authentication service tests
/// Tests password hashing, token validation and the login flow against a real store
mod common;

use common::create_test_app;
use roster_core::UserStore;
use roster_server::services::AuthService;

const PASSWORD: &str = "MySecurePassword123!";

/// Test password hashing produces valid bcrypt hashes
#[tokio::test]
async fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password(PASSWORD).unwrap();

    // bcrypt starts with $2b$ or $2a$
    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));
    assert_eq!(hash.len(), 60);

    // Random salt
    let hash2 = auth_service.hash_password(PASSWORD).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

/// Test password verification with invalid hash format
#[tokio::test]
async fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(result.is_err(), "Invalid hash should return error");
}

/// Test token validation with invalid signature
#[tokio::test]
async fn test_token_validation_invalid_signature() {
    let auth_service = create_test_auth_service();

    let other_auth = AuthService::new("different-secret".to_string(), 1, 1).with_hash_cost(4);
    let token = other_auth.create_access_token(7).unwrap();

    let result = auth_service.verify_access_token(&token);
    assert!(result.is_err(), "Token with wrong signature should fail validation");
}

/// Test token validation with malformed or empty tokens
#[tokio::test]
async fn test_token_validation_malformed() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_access_token("not.a.valid.jwt.token").is_err());
    assert!(auth_service.verify_access_token("").is_err());
    assert!(auth_service.verify_refresh_token("").is_err());
}

/// Test complete authentication flow with the store
#[tokio::test]
async fn test_complete_authentication_flow() {
    let app = create_test_app().await;
    let user = app
        .add_user_with_password("seed1", "seed1@mail.com", PASSWORD)
        .await;

    // Simulate login: retrieve hash and verify password
    let stored_hash = app
        .store
        .get_password_hash(user.id)
        .await
        .unwrap()
        .expect("credentials stored");
    assert!(app.auth_service.verify_password(PASSWORD, &stored_hash).unwrap());

    let access_token = app.auth_service.create_access_token(user.id).unwrap();
    let refresh_token = app.auth_service.create_refresh_token(user.id).unwrap();

    assert_eq!(app.auth_service.verify_access_token(&access_token).unwrap(), user.id);
    assert_eq!(app.auth_service.verify_refresh_token(&refresh_token).unwrap(), user.id);
}

/// Users created without a password have no credentials row
#[tokio::test]
async fn test_user_without_credentials() {
    let app = create_test_app().await;
    let user = app.add_user("seed1", "seed1@mail.com").await;

    let stored_hash = app.store.get_password_hash(user.id).await.unwrap();
    assert!(stored_hash.is_none());
}

/// Test multiple users with different passwords
#[tokio::test]
async fn test_multiple_users_authentication() {
    let app = create_test_app().await;

    let user1 = app
        .add_user_with_password("seed1", "seed1@mail.com", "Password1!")
        .await;
    let user2 = app
        .add_user_with_password("seed2", "seed2@mail.org", "Password2!")
        .await;

    let hash = app.store.get_password_hash(user1.id).await.unwrap().unwrap();
    assert!(app.auth_service.verify_password("Password1!", &hash).unwrap());
    assert!(!app.auth_service.verify_password("Password2!", &hash).unwrap());

    let hash = app.store.get_password_hash(user2.id).await.unwrap().unwrap();
    assert!(app.auth_service.verify_password("Password2!", &hash).unwrap());
    assert!(!app.auth_service.verify_password("Password1!", &hash).unwrap());
}

/// Test password update flow
#[tokio::test]
async fn test_password_update() {
    let app = create_test_app().await;
    let user = app
        .add_user_with_password("seed1", "seed1@mail.com", "OldPassword123!")
        .await;

    let new_hash = app.auth_service.hash_password("NewPassword456!").unwrap();
    roster_storage::users::set_password_hash(app.store.pool(), user.id, &new_hash)
        .await
        .unwrap();

    let hash = app.store.get_password_hash(user.id).await.unwrap().unwrap();
    assert!(!app.auth_service.verify_password("OldPassword123!", &hash).unwrap());
    assert!(app.auth_service.verify_password("NewPassword456!", &hash).unwrap());
}

fn create_test_auth_service() -> AuthService {
    AuthService::new(
        "test-secret-key-for-testing".to_string(),
        1, // 1 hour access token
        1, // 1 day refresh token
    )
    .with_hash_cost(4)
}
