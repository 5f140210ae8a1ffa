//! Accounts module
//!
//! User registration, credential lookup and login sessions.

pub mod password;
mod repository;
mod session;

pub use repository::AccountRepository;
pub use session::{IssuedSession, Session, SessionRepository};

/// Account repository errors
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Username already taken: {0}")]
    DuplicateUser(String),
}

/// Session repository errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User not found: {0}")]
    UserNotFound(uuid::Uuid),

    #[error("Session lifetime out of range: {0}")]
    InvalidTtl(chrono::Duration),
}
