//! Session Repository
//!
//! Issues and resolves login sessions. Clients hold an opaque bearer token;
//! only its SHA-256 digest is stored.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::SessionError;

const TOKEN_BYTES: usize = 32;

/// A stored login session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A freshly created session together with the clear-text token.
///
/// The token is only available here; it cannot be recovered later.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

/// Repository for login sessions
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new SessionRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Start a session for a user, valid for `ttl`
    pub async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<IssuedSession, SessionError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(SessionError::InvalidTtl(ttl))?;

        let token = generate_token();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at,
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id)
        .bind(user_id)
        .bind(hash_token(&token))
        .bind(session.created_at)
        .bind(session.expires_at.timestamp())
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                return Err(SessionError::UserNotFound(user_id));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(session_id = %session.id, user_id = %user_id, "Session created");
        Ok(IssuedSession { session, token })
    }

    /// Resolve a bearer token into its live session.
    ///
    /// Unknown tokens yield `None`; expired sessions are deleted and yield `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, SessionError> {
        let row: Option<(Uuid, Uuid, DateTime<Utc>, i64)> = sqlx::query_as(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE token_hash = ?",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, user_id, created_at, expires_at)) = row else {
            return Ok(None);
        };

        let session = Session {
            id,
            user_id,
            created_at,
            expires_at: DateTime::from_timestamp(expires_at, 0).unwrap_or(DateTime::<Utc>::MIN_UTC),
        };

        if session.is_expired_at(Utc::now()) {
            self.revoke(session.id).await?;
            tracing::debug!(session_id = %session.id, "Session expired");
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Delete a session. Returns whether it existed.
    pub async fn revoke(&self, session_id: Uuid) -> Result<bool, SessionError> {
        let rows = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }

    /// Delete every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> Result<u64, SessionError> {
        let rows = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows > 0 {
            tracing::info!(purged = rows, "Expired sessions purged");
        }
        Ok(rows)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
