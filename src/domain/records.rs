//! Stored records: users and the two per-user ledgers

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Amount, BillCategory, TransactionCategory};

/// A registered user. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// One income or expense entry in a user's transaction ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub category: TransactionCategory,
    pub description: String,
    pub amount: Amount,
    pub created_at: DateTime<Utc>,
}

/// One upcoming payment in a user's bill ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub due_date: NaiveDate,
    pub category: BillCategory,
    pub description: String,
    pub amount: Amount,
    pub created_at: DateTime<Utc>,
}
