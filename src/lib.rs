//! Mailbox - a one-letter-a-day journaling service.
//!
//! Users register, log in for a short-lived access token and a long-lived
//! refresh token, and write at most one letter per server-local day.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod letter;
pub mod logging;
pub mod mailbox;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, PasswordError, TokenClaims, TokenKind,
    TokenService,
};
pub use config::Config;
pub use datetime::{Clock, FixedClock, SystemClock};
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{MailboxError, Result};
pub use letter::{Letter, LetterRepository, NewLetter};
pub use mailbox::{AuthTokens, LetterEntry, MailboxService};
pub use web::WebServer;
