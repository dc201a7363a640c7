//! User repository (credential store).
//!
//! Reads go through the pool; [`UserRepository::insert`] takes a connection
//! so callers can run it inside their own transaction.

use sqlx::SqliteConnection;

use super::user::{NewUser, User};
use super::DbPool;
use crate::error::is_unique_violation;
use crate::{MailboxError, Result};

const SELECT_USER: &str = "SELECT id, username, password, nickname, created_at FROM users";

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user on the given connection.
    ///
    /// Returns the new user ID. A duplicate username is reported as
    /// [`MailboxError::Conflict`].
    pub async fn insert(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password, nickname) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.nickname)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                MailboxError::Conflict(format!("username '{}' is taken", new_user.username))
            } else {
                e.into()
            }
        })?;

        Ok(id)
    }

    /// Create a user outside of any caller transaction.
    #[cfg(test)]
    pub(crate) async fn create(&self, new_user: &NewUser) -> Result<User> {
        let mut conn = self.pool.acquire().await?;
        let id = Self::insert(&mut *conn, new_user).await?;
        drop(conn);

        self.get_by_id(id)
            .await?
            .ok_or_else(|| MailboxError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by exact username.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE username = ?"))
            .bind(username)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether a username is already registered.
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(self.pool)
                .await?;
        Ok(exists)
    }
}
