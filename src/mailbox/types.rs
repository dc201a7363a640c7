//! Mailbox service result types and input limits.

use crate::letter::Letter;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum nickname length in characters.
pub const MAX_NICKNAME_LENGTH: usize = 32;

/// Tokens handed out by login and refresh.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// The user's display name.
    pub nickname: String,
}

/// A listed letter with its past/today flag.
#[derive(Debug, Clone)]
pub struct LetterEntry {
    /// The stored letter.
    pub letter: Letter,
    /// True when the letter's day is before today.
    pub past: bool,
}
