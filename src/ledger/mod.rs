//! Ledger module
//!
//! Append-only, per-user ledgers of transactions and bills.

mod bills;
mod transactions;

pub use bills::BillLedger;
pub use transactions::TransactionLedger;

use uuid::Uuid;

/// Ledger errors
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Corrupt ledger record {id}: {reason}")]
    CorruptRecord { id: Uuid, reason: String },
}

/// Map an insert failure, turning a dangling owner into `UserNotFound`
fn map_insert_error(error: sqlx::Error, user_id: Uuid) -> LedgerError {
    match error {
        sqlx::Error::Database(e) if e.is_foreign_key_violation() => LedgerError::UserNotFound(user_id),
        e => LedgerError::Database(e),
    }
}
