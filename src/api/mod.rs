//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use chrono::Duration;
use sqlx::SqlitePool;

pub use routes::create_router;

/// Shared state for all routes
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Lifetime of sessions issued at login
    pub session_ttl: Duration,
}

impl AppState {
    pub fn new(pool: SqlitePool, session_ttl: Duration) -> Self {
        Self { pool, session_ttl }
    }
}
