//! Ledger Handlers
//!
//! Validate form input and append it to the acting user's ledgers.

use sqlx::SqlitePool;

use crate::domain::{
    Amount, Bill, BillCategory, DomainError, OperationContext, Transaction, TransactionCategory,
};
use crate::error::AppError;
use crate::ledger::{BillLedger, TransactionLedger};

use super::{AddBillCommand, AddTransactionCommand};

/// Handler for recording transactions
pub struct AddTransactionHandler {
    ledger: TransactionLedger,
}

impl AddTransactionHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            ledger: TransactionLedger::new(pool),
        }
    }

    /// Execute the command for the user in `context`
    pub async fn execute(
        &self,
        command: AddTransactionCommand,
        context: &OperationContext,
    ) -> Result<Transaction, AppError> {
        let user_id = context.user_id.ok_or(AppError::Unauthorized)?;
        let category: TransactionCategory = command.category.trim().parse()?;
        let amount: Amount = command.amount.parse().map_err(DomainError::from)?;
        let description = command.description.as_deref().unwrap_or_default().trim();

        let transaction = self
            .ledger
            .add(user_id, command.date, category, description, amount)
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            user_id = %user_id,
            correlation_id = ?context.correlation_id,
            "Transaction added"
        );

        Ok(transaction)
    }
}

/// Handler for recording bills
pub struct AddBillHandler {
    ledger: BillLedger,
}

impl AddBillHandler {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            ledger: BillLedger::new(pool),
        }
    }

    /// Execute the command for the user in `context`
    pub async fn execute(
        &self,
        command: AddBillCommand,
        context: &OperationContext,
    ) -> Result<Bill, AppError> {
        let user_id = context.user_id.ok_or(AppError::Unauthorized)?;
        let category: BillCategory = command.category.trim().parse()?;
        let amount: Amount = command.amount.parse().map_err(DomainError::from)?;
        let description = command.description.as_deref().unwrap_or_default().trim();

        let bill = self
            .ledger
            .add(user_id, command.due_date, category, description, amount)
            .await?;

        tracing::info!(
            bill_id = %bill.id,
            user_id = %user_id,
            correlation_id = ?context.correlation_id,
            "Bill added"
        );

        Ok(bill)
    }
}
