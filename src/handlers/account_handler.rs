//! Account Handlers
//!
//! Registration, login and logout.

use chrono::Duration;
use sqlx::SqlitePool;

use crate::accounts::{AccountRepository, SessionRepository};
use crate::domain::{DomainError, OperationContext};
use crate::error::AppError;

use super::{LoginCommand, LoginResult, RegisterCommand, RegisterResult};

/// Handler for user registration
pub struct RegisterHandler {
    accounts: AccountRepository,
}

impl RegisterHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Execute the register command
    pub async fn execute(&self, command: RegisterCommand) -> Result<RegisterResult, AppError> {
        let username = command.username.trim();
        if username.is_empty() {
            return Err(DomainError::EmptyField("username").into());
        }
        if command.password.is_empty() {
            return Err(DomainError::EmptyField("password").into());
        }

        let user_id = self.accounts.create_user(username, &command.password).await?;

        Ok(RegisterResult {
            user_id,
            username: username.to_string(),
        })
    }
}

/// Handler for logging in
pub struct LoginHandler {
    accounts: AccountRepository,
    sessions: SessionRepository,
    session_ttl: Duration,
}

impl LoginHandler {
    pub fn new(pool: SqlitePool, session_ttl: Duration) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            session_ttl,
        }
    }

    /// Execute the login command, issuing a session token on success
    pub async fn execute(&self, command: LoginCommand) -> Result<LoginResult, AppError> {
        let user = self
            .accounts
            .get_user(command.username.trim(), &command.password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let issued = self.sessions.create(user.id, self.session_ttl).await?;

        tracing::info!(user_id = %user.id, session_id = %issued.session.id, "User logged in");

        Ok(LoginResult {
            user_id: user.id,
            username: user.username,
            token: issued.token,
            expires_at: issued.session.expires_at,
        })
    }
}

/// Handler for logging out of the current session
pub struct LogoutHandler {
    sessions: SessionRepository,
}

impl LogoutHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sessions: SessionRepository::new(pool),
        }
    }

    pub async fn execute(&self, context: &OperationContext) -> Result<(), AppError> {
        let session_id = context.session_id.ok_or(AppError::Unauthorized)?;
        self.sessions.revoke(session_id).await?;

        tracing::info!(
            session_id = %session_id,
            user_id = ?context.user_id,
            correlation_id = ?context.correlation_id,
            "User logged out"
        );
        Ok(())
    }
}
