use crate::users;
use async_trait::async_trait;
use roster_core::{
    error::Result,
    storage::UserStore,
    types::{CreateUser, User, UserId},
};
use sqlx::SqlitePool;

/// User store backed by a local `SQLite` pool
#[derive(Debug, Clone)]
pub struct LocalUserStore {
    pool: SqlitePool,
}

impl LocalUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for LocalUserStore {
    async fn create_user(&self, user: CreateUser, password_hash: Option<String>) -> Result<User> {
        users::create(&self.pool, user, password_hash.as_deref())
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await.map_err(Into::into)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        users::get_by_email(&self.pool, email)
            .await
            .map_err(Into::into)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        users::get_by_username(&self.pool, username)
            .await
            .map_err(Into::into)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await.map_err(Into::into)
    }

    async fn set_active(&self, id: UserId, active: bool) -> Result<()> {
        users::set_active(&self.pool, id, active)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        users::delete(&self.pool, id).await.map_err(Into::into)
    }

    async fn count_users(&self) -> Result<i64> {
        users::count(&self.pool).await.map_err(Into::into)
    }

    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id)
            .await
            .map_err(Into::into)
    }
}
