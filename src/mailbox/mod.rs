//! Mailbox service.
//!
//! Orchestrates the credential store, the letter store and the token
//! service: signup, login, refresh, and the daily letter operations.

mod service;
mod types;

pub use service::MailboxService;
pub use types::{AuthTokens, LetterEntry, MAX_NICKNAME_LENGTH, MAX_USERNAME_LENGTH};
