//! Account Repository
//!
//! Persists users and looks them up by credentials.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::User;

use super::password::{hash_password, verify_password};
use super::AccountError;

/// Repository for registered users
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new AccountRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user and return its ID.
    ///
    /// Fails with `AccountError::DuplicateUser` if the username is taken.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<Uuid, AccountError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateUser(username.to_string()));
        }

        let user_id = Uuid::new_v4();
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(hash_password(password))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            // Lost a race with a concurrent registration
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(AccountError::DuplicateUser(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await?;

        tracing::info!(user_id = %user_id, username = %username, "User registered");
        Ok(user_id)
    }

    /// Find the user matching both username and password.
    ///
    /// Unknown username and wrong password both yield `None`.
    pub async fn get_user(&self, username: &str, password: &str) -> Result<Option<User>, AccountError> {
        let row: Option<(Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, username, password_hash, created_at)) = row else {
            return Ok(None);
        };

        if !verify_password(password, &password_hash) {
            tracing::debug!(user_id = %id, "Password mismatch");
            return Ok(None);
        }

        Ok(Some(User {
            id,
            username,
            created_at,
        }))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AccountError> {
        let row: Option<(Uuid, String, DateTime<Utc>)> =
            sqlx::query_as("SELECT id, username, created_at FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, username, created_at)| User {
            id,
            username,
            created_at,
        }))
    }
}
