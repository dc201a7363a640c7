//! Authentication module.
//!
//! Password hashing and the token service.

mod password;
mod token;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
};
pub use token::{TokenClaims, TokenKind, TokenService};
