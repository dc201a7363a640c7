//! Web API module.
//!
//! REST surface over the mailbox service: `/auth/*` for accounts and tokens,
//! `/api/letters*` for the bearer-authenticated letter operations.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
