//! API handlers.

pub mod auth;
pub mod letter;

pub use auth::*;
pub use letter::*;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::mailbox::MailboxService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account and letter operations.
    pub mailbox: MailboxService,
    /// Token service, also injected into request extensions for `AuthUser`.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(mailbox: MailboxService, tokens: Arc<TokenService>) -> Self {
        Self { mailbox, tokens }
    }
}
