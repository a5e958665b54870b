//! User accounts and credentials queries

use crate::StorageError;
use roster_core::types::{CreateUser, User, UserId};
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, StorageError>;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    active: bool,
    admin: bool,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let created_at = chrono::DateTime::from_timestamp(row.created_at, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        User {
            id: row.id,
            username: row.username,
            email: row.email,
            active: row.active,
            admin: row.admin,
            created_at,
        }
    }
}

const SELECT_USER: &str = "SELECT id, username, email, active, admin, created_at FROM users";

/// Create a new user
///
/// The user row and the optional credentials are written in one transaction,
/// so a duplicate username or email leaves no partial state behind.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Username, email and admin flag (the plaintext password is ignored)
/// * `password_hash` - Already hashed password to store as credentials
pub async fn create(
    pool: &SqlitePool,
    user: CreateUser,
    password_hash: Option<&str>,
) -> Result<User> {
    let now = chrono::Utc::now().timestamp();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO users (username, email, active, admin, created_at) VALUES (?, ?, 1, ?, ?)",
    )
    .bind(user.username.trim())
    .bind(user.email.trim())
    .bind(user.admin)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    if let Some(hash) = password_hash {
        sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES (?, ?)")
            .bind(id)
            .bind(hash)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", id.to_string()))
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(User::from))
}

/// Get a user by exact email
pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = ?"))
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(User::from))
}

/// Get a user by exact username
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE username = ?"))
        .bind(username.trim())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(User::from))
}

/// Get all users in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

/// Enable or disable an account
pub async fn set_active(pool: &SqlitePool, id: UserId, active: bool) -> Result<()> {
    let result = sqlx::query("UPDATE users SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("User", id.to_string()));
    }

    Ok(())
}

/// Delete a user together with their credentials
pub async fn delete(pool: &SqlitePool, id: UserId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM user_credentials WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("User", id.to_string()));
    }

    tx.commit().await?;
    Ok(())
}

/// Count stored users
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Get user's password hash for authentication
///
/// Returns `None` if the user has no credentials.
pub async fn get_password_hash(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Create or update user credentials
///
/// `password_hash` should already be hashed with bcrypt.
pub async fn set_password_hash(
    pool: &SqlitePool,
    user_id: UserId,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = datetime('now')",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}
