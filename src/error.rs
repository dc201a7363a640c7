//! Error types for the mailbox service.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for mailbox operations.
#[derive(Error, Debug)]
pub enum MailboxError {
    /// A user or letter does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness rule was violated (duplicate username, second letter of the day).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Password did not match the stored hash.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token is malformed, tampered with, expired or of the wrong kind.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Caller does not own the resource.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The store could not be reached (pool timeout, connection loss).
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database error.
    ///
    /// Wraps any other failure reported by the database backend.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for MailboxError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                MailboxError::StoreUnavailable(e.to_string())
            }
            _ => MailboxError::Database(e.to_string()),
        }
    }
}

impl From<PasswordError> for MailboxError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Empty | PasswordError::TooLong => {
                MailboxError::Validation(e.to_string())
            }
            PasswordError::VerificationFailed => MailboxError::InvalidCredentials,
            PasswordError::HashError(_) => MailboxError::Config(e.to_string()),
            PasswordError::InvalidHash => MailboxError::Database(e.to_string()),
        }
    }
}

/// Returns true if the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Result type alias for mailbox operations.
pub type Result<T> = std::result::Result<T, MailboxError>;
