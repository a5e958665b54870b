//! Integration tests for the users vertical slice
//!
//! Tests user operations including:
//! - Creation defaults (active, not admin, timestamp)
//! - Unique username and email constraints
//! - Lookup by id, email and username
//! - Listing order, activation, deletion
//! - Credentials storage


use roster_core::{types::CreateUser, RosterError, UserStore};
use roster_storage::{users, LocalUserStore, StorageError};
use test_helpers::*;

#[tokio::test]
async fn test_create_user_defaults() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "test", "test@test.com").await;

    assert!(user.id > 0);
    assert_eq!(user.username, "test");
    assert_eq!(user.email, "test@test.com");
    assert!(user.active);
    assert!(!user.admin);
    assert!(chrono::DateTime::parse_from_rfc3339(&user.created_at).is_ok());
}

#[tokio::test]
async fn test_create_admin_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = users::create(pool, CreateUser::new("root", "root@test.com").as_admin(), None)
        .await
        .unwrap();

    assert!(user.admin);
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "test", "test@test.com").await;

    let result = users::create(pool, CreateUser::new("test", "test2@test.com"), None).await;
    match result {
        Err(StorageError::Duplicate(field)) => assert_eq!(field, "username"),
        other => panic!("Expected duplicate username, got {:?}", other.map(|u| u.id)),
    }

    assert_eq!(users::count(pool).await.unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "test", "test@test.com").await;

    let result = users::create(pool, CreateUser::new("test2", "test@test.com"), None).await;
    match result {
        Err(StorageError::Duplicate(field)) => assert_eq!(field, "email"),
        other => panic!("Expected duplicate email, got {:?}", other.map(|u| u.id)),
    }
}

#[tokio::test]
async fn test_duplicate_does_not_leave_credentials() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_test_user(pool, "test", "test@test.com").await;

    let result = users::create(pool, CreateUser::new("test", "other@test.com"), Some("hash")).await;
    assert!(result.is_err());

    assert!(users::get_password_hash(pool, first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_by_id_email_and_username() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "seed1", "seed1@mail.com").await;

    let by_id = users::get_by_id(pool, user.id).await.unwrap().unwrap();
    assert_eq!(by_id, user);

    let by_email = users::get_by_email(pool, "seed1@mail.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_name = users::get_by_username(pool, "seed1").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(users::get_by_id(pool, 999).await.unwrap().is_none());
    assert!(users::get_by_email(pool, "nobody@mail.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_all_in_insertion_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    // Names deliberately out of alphabetical order
    create_test_user(pool, "zed", "zed@mail.com").await;
    create_test_user(pool, "amy", "amy@mail.com").await;

    let all = users::get_all(pool).await.unwrap();
    let names: Vec<_> = all.iter().map(|u| u.username.as_str()).collect();

    assert_eq!(names, vec!["zed", "amy"]);
}

#[tokio::test]
async fn test_set_active() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "test", "test@test.com").await;

    users::set_active(pool, user.id, false).await.unwrap();
    let user = users::get_by_id(pool, user.id).await.unwrap().unwrap();
    assert!(!user.active);

    let missing = users::set_active(pool, 999, true).await;
    assert!(matches!(missing, Err(StorageError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_removes_user_and_credentials() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = users::create(pool, CreateUser::new("test", "test@test.com"), Some("hash"))
        .await
        .unwrap();

    users::delete(pool, user.id).await.unwrap();

    assert!(users::get_by_id(pool, user.id).await.unwrap().is_none());
    assert!(users::get_password_hash(pool, user.id).await.unwrap().is_none());
    assert!(matches!(
        users::delete(pool, user.id).await,
        Err(StorageError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_password_hash_upsert() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "test", "test@test.com").await;
    assert!(users::get_password_hash(pool, user.id).await.unwrap().is_none());

    users::set_password_hash(pool, user.id, "first").await.unwrap();
    users::set_password_hash(pool, user.id, "second").await.unwrap();

    let hash = users::get_password_hash(pool, user.id).await.unwrap();
    assert_eq!(hash.as_deref(), Some("second"));
}

#[tokio::test]
async fn test_local_store_maps_errors_to_core() {
    let test_db = TestDb::new().await;
    let store = LocalUserStore::new(test_db.pool().clone());

    store
        .create_user(CreateUser::new("test", "test@test.com"), None)
        .await
        .unwrap();

    let result = store
        .create_user(CreateUser::new("other", "test@test.com"), None)
        .await;
    assert!(matches!(result, Err(RosterError::Duplicate(ref f)) if f == "email"));

    assert_eq!(store.count_users().await.unwrap(), 1);
    assert_eq!(store.get_all_users().await.unwrap().len(), 1);
}
