//! Letter types.

use chrono::{NaiveDate, NaiveDateTime};

/// Maximum letter length in characters.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// A stored letter.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Letter {
    /// Letter ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Letter body.
    pub content: String,
    /// Calendar day the letter belongs to.
    pub target_date: NaiveDate,
    /// When the letter was written (server local time).
    pub created_at: NaiveDateTime,
}

impl Letter {
    /// A letter is past once its day is before `today`.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.target_date < today
    }
}

/// Data for creating a letter.
#[derive(Debug, Clone)]
pub struct NewLetter {
    /// Owning user ID.
    pub user_id: i64,
    /// Letter body.
    pub content: String,
    /// Calendar day the letter belongs to.
    pub target_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

impl NewLetter {
    /// Create a letter for `created_at`'s calendar day.
    pub fn new(user_id: i64, content: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            content: content.into(),
            target_date: created_at.date(),
            created_at,
        }
    }
}
