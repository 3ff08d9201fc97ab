//! Session state: persisted tokens and the per-session profile cache.

pub mod tokens;
pub mod user;

pub use tokens::TokenStore;
pub use user::{ADMIN_SCOPE, User, UserStore};
