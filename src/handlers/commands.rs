//! Command definitions
//!
//! Commands represent intentions to change the system state. Categories and
//! amounts travel as raw text; handlers parse them so rejected input maps to
//! domain errors. Amounts are never rounded through floating point.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// Accounts
// =========================================================================

/// Command to register a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Command to log in with username and password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResult {
    pub user_id: Uuid,
    pub username: String,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// =========================================================================
// Ledgers
// =========================================================================

/// Command to record an income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTransactionCommand {
    pub date: NaiveDate,
    pub category: String,
    pub amount: String,
    pub description: Option<String>,
}

impl AddTransactionCommand {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            date,
            category: category.into(),
            amount: amount.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Command to record an upcoming bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBillCommand {
    pub due_date: NaiveDate,
    pub category: String,
    pub amount: String,
    pub description: Option<String>,
}

impl AddBillCommand {
    pub fn new(due_date: NaiveDate, category: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            due_date,
            category: category.into(),
            amount: amount.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
