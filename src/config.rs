//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Longest session lifetime accepted from the environment (100 years)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 100;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL (SQLite)
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Lifetime of a login session in hours
    pub session_ttl_hours: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://budget_buddy.db".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let session_ttl_hours = parse_session_ttl_hours(
            &env::var("SESSION_TTL_HOURS").unwrap_or_else(|_| "24".to_string()),
        )?;

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            session_ttl_hours,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Session lifetime as a duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

/// Session lifetime must be positive and at most `MAX_SESSION_TTL_HOURS`
fn parse_session_ttl_hours(raw: &str) -> Result<i64, ConfigError> {
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue("SESSION_TTL_HOURS"))?;

    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        return Err(ConfigError::InvalidValue("SESSION_TTL_HOURS"));
    }
    Ok(hours)
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
