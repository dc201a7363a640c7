//! Database schema and migrations.
//!
//! Migrations are applied in order; `schema_version` records how many have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    nickname    TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: letters, one per user per day
    r#"
CREATE TABLE letters (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content     TEXT NOT NULL,
    target_date TEXT NOT NULL,           -- YYYY-MM-DD, server local date
    created_at  TEXT NOT NULL,
    UNIQUE (user_id, target_date)
);

CREATE INDEX idx_letters_user_date ON letters(user_id, target_date DESC);
"#,
];
