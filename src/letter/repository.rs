//! Letter repository.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::types::{Letter, NewLetter};
use crate::db::DbPool;
use crate::error::is_unique_violation;
use crate::{MailboxError, Result};

const SELECT_LETTER: &str = "SELECT id, user_id, content, target_date, created_at FROM letters";

/// Repository for letter records.
///
/// Write helpers take a connection so they can run inside the caller's
/// transaction; reads go through the pool.
pub struct LetterRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> LetterRepository<'a> {
    /// Create a new LetterRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a letter, returning its ID.
    ///
    /// The UNIQUE(user_id, target_date) constraint makes this the authoritative
    /// one-per-day check; a violation becomes [`MailboxError::Conflict`].
    pub async fn insert(conn: &mut SqliteConnection, letter: &NewLetter) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO letters (user_id, content, target_date, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(letter.user_id)
        .bind(&letter.content)
        .bind(letter.target_date)
        .bind(letter.created_at)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                MailboxError::Conflict("already written today".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(id)
    }

    /// Delete a letter only if `user_id` owns it. Returns true if a row was removed.
    pub async fn delete_owned(conn: &mut SqliteConnection, id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM letters WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Look up the owner of a letter on the given connection.
    pub async fn owner_of(conn: &mut SqliteConnection, id: i64) -> Result<Option<i64>> {
        let owner = sqlx::query_scalar("SELECT user_id FROM letters WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(owner)
    }

    /// Get a letter by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Letter>> {
        let letter = sqlx::query_as::<_, Letter>(&format!("{SELECT_LETTER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(letter)
    }

    /// Check whether the user has a letter for `date`.
    pub async fn exists_for_date(&self, user_id: i64, date: NaiveDate) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM letters WHERE user_id = ? AND target_date = ?)",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(self.pool)
        .await?;
        Ok(exists)
    }

    /// List the user's letters dated on or before `date`, newest day first.
    pub async fn list_until(&self, user_id: i64, date: NaiveDate) -> Result<Vec<Letter>> {
        let letters = sqlx::query_as::<_, Letter>(&format!(
            "{SELECT_LETTER} WHERE user_id = ? AND target_date <= ?
             ORDER BY target_date DESC, id DESC"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(self.pool)
        .await?;
        Ok(letters)
    }
}
