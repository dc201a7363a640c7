//! Response DTOs for Web API.

use serde::Serialize;

use crate::datetime::format_date;
use crate::mailbox::{AuthTokens, LetterEntry};

/// Login / refresh response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token (JWT).
    pub refresh_token: String,
    /// The user's display name.
    pub nickname: String,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            nickname: tokens.nickname,
        }
    }
}

/// A letter as returned by the API.
#[derive(Debug, Serialize)]
pub struct LetterDto {
    /// Letter ID.
    pub id: i64,
    /// Letter body.
    pub content: String,
    /// The letter's day, `YYYY-MM-DD`.
    pub date: String,
    /// True when the day is before today.
    pub past: bool,
}

impl From<LetterEntry> for LetterDto {
    fn from(entry: LetterEntry) -> Self {
        Self {
            id: entry.letter.id,
            date: format_date(entry.letter.target_date),
            content: entry.letter.content,
            past: entry.past,
        }
    }
}
