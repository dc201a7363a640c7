//! User model.

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, immutable).
    pub username: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (must already be hashed).
    pub password: String,
    /// Display name.
    pub nickname: String,
}

impl NewUser {
    /// Create a new user record from an already-hashed password.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
            nickname: nickname.into(),
        }
    }
}
