//! Letter store.
//!
//! A letter is a short diary entry; each user may keep at most one per
//! calendar day.

mod repository;
mod types;

pub use repository::LetterRepository;
pub use types::{Letter, NewLetter, MAX_CONTENT_LENGTH};
