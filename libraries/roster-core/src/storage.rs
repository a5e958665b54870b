//! Storage trait for user records

use crate::error::Result;
use crate::types::{CreateUser, User, UserId};
use async_trait::async_trait;

/// Access to persisted users
///
/// Implemented by the `SQLite` store; handlers only depend on this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user, storing a password hash when one is supplied
    ///
    /// `password_hash` must already be hashed.
    async fn create_user(&self, user: CreateUser, password_hash: Option<String>) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get all users, ordered by ID
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Enable or disable an account
    async fn set_active(&self, id: UserId, active: bool) -> Result<()>;

    /// Delete a user and their credentials
    async fn delete_user(&self, id: UserId) -> Result<()>;

    /// Number of stored users
    async fn count_users(&self) -> Result<i64>;

    /// Stored password hash, if the user has credentials
    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>>;
}
