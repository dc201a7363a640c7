//! Mailbox service implementation.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::types::{AuthTokens, LetterEntry, MAX_NICKNAME_LENGTH, MAX_USERNAME_LENGTH};
use crate::auth::{hash_password, validate_password, verify_password, PasswordError};
use crate::auth::{TokenKind, TokenService};
use crate::datetime::{Clock, SystemClock};
use crate::db::{Database, NewUser, User, UserRepository};
use crate::letter::{Letter, LetterRepository, NewLetter, MAX_CONTENT_LENGTH};
use crate::{MailboxError, Result};

/// Service for account and letter operations.
///
/// Every operation takes the acting username explicitly; there is no
/// per-request ambient state.
#[derive(Clone)]
pub struct MailboxService {
    db: Database,
    tokens: Arc<TokenService>,
    clock: Arc<dyn Clock>,
}

impl MailboxService {
    /// Create a service using the system clock.
    pub fn new(db: Database, tokens: Arc<TokenService>) -> Self {
        Self {
            db,
            tokens,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock (tests pin "today" with a `FixedClock`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The token service used for login and refresh.
    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// The server's current local date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Register a new user.
    ///
    /// A missing or blank nickname defaults to the username. No token is issued.
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty/over-long username, password or nickname
    /// - `Conflict` if the username is taken
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<User> {
        validate_username(username)?;
        validate_password(password)?;
        let nickname = resolve_nickname(username, nickname)?;

        let user_repo = UserRepository::new(self.db.pool());
        // Fast path before paying for the hash; the UNIQUE constraint still decides.
        if user_repo.username_exists(username).await? {
            warn!(username, "Registration rejected: username taken");
            return Err(MailboxError::Conflict(format!(
                "username '{username}' is taken"
            )));
        }

        let password_hash = hash_password(password).map_err(|e| {
            tracing::error!(username, error = %e, "Password hashing failed");
            MailboxError::from(e)
        })?;
        let new_user = NewUser::new(username, password_hash, nickname);

        let mut tx = self.db.begin().await?;
        let user_id = UserRepository::insert(&mut *tx, &new_user).await?;
        tx.commit().await?;

        info!(username, user_id, "User registered");

        user_repo
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| MailboxError::NotFound("user".to_string()))
    }

    /// Log in with a username and password.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the username is unknown
    /// - `InvalidCredentials` if the password does not match
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens> {
        let user = self.resolve_user(username).await?;

        verify_password(password, &user.password).map_err(|e| {
            match e {
                PasswordError::VerificationFailed => warn!(username, "Login failed: wrong password"),
                ref other => {
                    tracing::error!(username, error = %other, "Stored password hash is unusable")
                }
            }
            MailboxError::from(e)
        })?;

        let tokens = AuthTokens {
            access_token: self.tokens.create_access_token(&user.username)?,
            refresh_token: self.tokens.create_refresh_token(&user.username)?,
            nickname: user.nickname,
        };

        info!(username, "User logged in");
        Ok(tokens)
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token is returned unchanged; it is not rotated.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the token is bad, expired or not a refresh token
    /// - `NotFound` if its user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        let claims = self.tokens.decode(refresh_token, TokenKind::Refresh)?;
        let user = self.resolve_user(&claims.sub).await?;

        debug!(username = %user.username, "Access token refreshed");
        Ok(AuthTokens {
            access_token: self.tokens.create_access_token(&user.username)?,
            refresh_token: refresh_token.to_string(),
            nickname: user.nickname,
        })
    }

    /// Write today's letter.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user does not exist
    /// - `Validation` for blank or over-long content
    /// - `Conflict` if the user already wrote a letter today
    pub async fn write_letter(&self, username: &str, content: &str) -> Result<Letter> {
        let user = self.resolve_user(username).await?;
        validate_content(content)?;

        let new_letter = NewLetter::new(user.id, content, self.clock.now());

        let mut tx = self.db.begin().await?;
        let id = match LetterRepository::insert(&mut *tx, &new_letter).await {
            Ok(id) => id,
            Err(e) => {
                if matches!(e, MailboxError::Conflict(_)) {
                    warn!(username, date = %new_letter.target_date, "Letter already written today");
                }
                return Err(e);
            }
        };
        tx.commit().await?;

        info!(username, letter_id = id, date = %new_letter.target_date, "Letter written");

        LetterRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .ok_or_else(|| MailboxError::NotFound("letter".to_string()))
    }

    /// List the user's letters up to today, newest first.
    pub async fn get_letters(&self, username: &str) -> Result<Vec<LetterEntry>> {
        let user = self.resolve_user(username).await?;
        let today = self.clock.today();

        let letters = LetterRepository::new(self.db.pool())
            .list_until(user.id, today)
            .await?;

        Ok(letters
            .into_iter()
            .map(|letter| LetterEntry {
                past: letter.is_past(today),
                letter,
            })
            .collect())
    }

    /// Whether the user has already written today.
    pub async fn has_written_today(&self, username: &str) -> Result<bool> {
        let user = self.resolve_user(username).await?;
        LetterRepository::new(self.db.pool())
            .exists_for_date(user.id, self.clock.today())
            .await
    }

    /// Delete one of the user's letters.
    ///
    /// The owner-scoped delete runs first inside the transaction; the letter is
    /// only inspected when nothing was deleted.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user or the letter does not exist
    /// - `Authorization` if the letter belongs to someone else
    pub async fn delete_letter(&self, username: &str, letter_id: i64) -> Result<()> {
        let user = self.resolve_user(username).await?;

        let mut tx = self.db.begin().await?;
        if LetterRepository::delete_owned(&mut *tx, letter_id, user.id).await? {
            tx.commit().await?;
            info!(username, letter_id, "Letter deleted");
            return Ok(());
        }

        let owner = LetterRepository::owner_of(&mut *tx, letter_id).await?;
        tx.rollback().await?;

        match owner {
            None => Err(MailboxError::NotFound("letter".to_string())),
            Some(_) => {
                warn!(username, letter_id, "Refused to delete another user's letter");
                Err(MailboxError::Authorization(
                    "letter belongs to another user".to_string(),
                ))
            }
        }
    }

    async fn resolve_user(&self, username: &str) -> Result<User> {
        UserRepository::new(self.db.pool())
            .get_by_username(username)
            .await?
            .ok_or_else(|| MailboxError::NotFound("user".to_string()))
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(MailboxError::Validation("username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(MailboxError::Validation(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_control) {
        return Err(MailboxError::Validation(
            "username must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

fn resolve_nickname(username: &str, nickname: Option<&str>) -> Result<String> {
    let nickname = match nickname.map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => return Ok(username.to_string()),
    };
    if nickname.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(MailboxError::Validation(format!(
            "nickname must be at most {MAX_NICKNAME_LENGTH} characters"
        )));
    }
    Ok(nickname.to_string())
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(MailboxError::Validation("letter content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(MailboxError::Validation(format!(
            "letter must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
