//! Report Service
//!
//! Read models derived from a user's ledgers: summaries, month lists and the
//! combined dashboard view.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{months_with_activity, Bill, Shares, Summary, Transaction, YearMonth};
use crate::ledger::{BillLedger, LedgerError, TransactionLedger};

/// Summary totals plus the chart split
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<YearMonth>,
    #[serde(flatten)]
    pub summary: Summary,
    pub shares: Option<Shares>,
}

impl SummaryReport {
    fn new(month: Option<YearMonth>, transactions: &[Transaction]) -> Self {
        let summary = Summary::from_transactions(transactions);
        Self {
            month,
            summary,
            shares: summary.shares(),
        }
    }
}

/// Everything the main page shows
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub transactions: Vec<Transaction>,
    pub bills: Vec<Bill>,
    pub summary: SummaryReport,
}

/// Read-side service over both ledgers
#[derive(Debug, Clone)]
pub struct ReportService {
    transactions: TransactionLedger,
    bills: BillLedger,
}

impl ReportService {
    /// Create a new ReportService
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            transactions: TransactionLedger::new(pool.clone()),
            bills: BillLedger::new(pool),
        }
    }

    /// Transactions of a user, optionally limited to one month
    pub async fn transactions(
        &self,
        user_id: Uuid,
        month: Option<YearMonth>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        match month {
            Some(month) => self.transactions.list_in_month(user_id, month).await,
            None => self.transactions.list(user_id).await,
        }
    }

    /// Bills of a user, optionally only those due on or after `from`
    pub async fn bills(
        &self,
        user_id: Uuid,
        from: Option<NaiveDate>,
    ) -> Result<Vec<Bill>, LedgerError> {
        match from {
            Some(from) => self.bills.list_due_from(user_id, from).await,
            None => self.bills.list(user_id).await,
        }
    }

    /// Income, expense and balance, optionally for one month
    pub async fn summary(
        &self,
        user_id: Uuid,
        month: Option<YearMonth>,
    ) -> Result<SummaryReport, LedgerError> {
        let transactions = self.transactions(user_id, month).await?;
        Ok(SummaryReport::new(month, &transactions))
    }

    /// Months in which the user has transactions, oldest first
    pub async fn months(&self, user_id: Uuid) -> Result<Vec<YearMonth>, LedgerError> {
        let transactions = self.transactions.list(user_id).await?;
        Ok(months_with_activity(&transactions))
    }

    /// Full dashboard: both ledgers and the overall summary
    pub async fn dashboard(&self, user_id: Uuid) -> Result<Dashboard, LedgerError> {
        let transactions = self.transactions.list(user_id).await?;
        let bills = self.bills.list(user_id).await?;
        let summary = SummaryReport::new(None, &transactions);

        tracing::debug!(
            user_id = %user_id,
            transactions = transactions.len(),
            bills = bills.len(),
            "Dashboard built"
        );

        Ok(Dashboard {
            transactions,
            bills,
            summary,
        })
    }
}
