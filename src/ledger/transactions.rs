//! Transaction Ledger
//!
//! Income and expense entries, ordered by date then insertion.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{Amount, Transaction, TransactionCategory, YearMonth};

use super::{map_insert_error, LedgerError};

type TransactionRow = (Uuid, Uuid, NaiveDate, String, String, String, DateTime<Utc>);

/// Repository for the transaction ledger
#[derive(Debug, Clone)]
pub struct TransactionLedger {
    pool: SqlitePool,
}

impl TransactionLedger {
    /// Create a new TransactionLedger
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a transaction to a user's ledger
    pub async fn add(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        category: TransactionCategory,
        description: &str,
        amount: Amount,
    ) -> Result<Transaction, LedgerError> {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id,
            date,
            category,
            description: description.to_string(),
            amount,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, date, category, description, amount, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.id)
        .bind(user_id)
        .bind(date)
        .bind(category.as_str())
        .bind(&transaction.description)
        .bind(amount.to_string())
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, user_id))?;

        tracing::debug!(
            transaction_id = %transaction.id,
            user_id = %user_id,
            category = %category,
            amount = %amount,
            "Transaction recorded"
        );

        Ok(transaction)
    }

    /// All transactions of a user, oldest first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, category, description, amount, created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY date ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }

    /// Transactions of a user dated within one calendar month, oldest first
    pub async fn list_in_month(
        &self,
        user_id: Uuid,
        month: YearMonth,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, date, category, description, amount, created_at
            FROM transactions
            WHERE user_id = ? AND date >= ? AND date < ?
            ORDER BY date ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .bind(month.first_day())
        .bind(month.next_first_day())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }
}

fn from_row(row: TransactionRow) -> Result<Transaction, LedgerError> {
    let (id, user_id, date, category, description, amount, created_at) = row;
    let corrupt = |reason: String| LedgerError::CorruptRecord { id, reason };

    Ok(Transaction {
        id,
        user_id,
        date,
        category: category
            .parse::<TransactionCategory>()
            .map_err(|e| corrupt(e.to_string()))?,
        description,
        amount: amount.parse::<Amount>().map_err(|e| corrupt(e.to_string()))?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRepository;
    use crate::db;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (TransactionLedger, Uuid) {
        let pool = db::connect_in_memory().await.unwrap();
        let user_id = AccountRepository::new(pool.clone())
            .create_user("alice", "pw")
            .await
            .unwrap();
        (TransactionLedger::new(pool), user_id)
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let (ledger, user_id) = setup().await;

        let added = ledger
            .add(
                user_id,
                date(2024, 1, 1),
                TransactionCategory::Income,
                "Salary",
                Amount::from_integer(5_000_000).unwrap(),
            )
            .await
            .unwrap();

        let listed = ledger.list(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
        assert_eq!(listed[0].description, "Salary");
        assert_eq!(listed[0].amount.value(), dec!(5000000));
        assert_eq!(listed[0].category, TransactionCategory::Income);
        assert_eq!(listed[0].date, date(2024, 1, 1));
    }

    #[tokio::test]
    async fn test_list_ordered_by_date_then_insertion() {
        let (ledger, user_id) = setup().await;
        let one = Amount::from_integer(1).unwrap();

        ledger.add(user_id, date(2024, 2, 1), TransactionCategory::Expense, "b", one).await.unwrap();
        ledger.add(user_id, date(2024, 1, 15), TransactionCategory::Income, "a", one).await.unwrap();
        ledger.add(user_id, date(2024, 2, 1), TransactionCategory::Income, "c", one).await.unwrap();

        let descriptions: Vec<String> = ledger
            .list(user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descriptions, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let pool = db::connect_in_memory().await.unwrap();
        let accounts = AccountRepository::new(pool.clone());
        let alice = accounts.create_user("alice", "pw").await.unwrap();
        let bob = accounts.create_user("bob", "pw").await.unwrap();
        let ledger = TransactionLedger::new(pool);

        let amount = Amount::from_integer(10).unwrap();
        ledger.add(alice, date(2024, 1, 1), TransactionCategory::Income, "", amount).await.unwrap();

        assert_eq!(ledger.list(alice).await.unwrap().len(), 1);
        assert!(ledger.list(bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_in_month() {
        let (ledger, user_id) = setup().await;
        let amount = Amount::from_integer(10).unwrap();

        for d in [date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 29), date(2024, 3, 1)] {
            ledger.add(user_id, d, TransactionCategory::Expense, "", amount).await.unwrap();
        }

        let february = ledger.list_in_month(user_id, "2024-02".parse().unwrap()).await.unwrap();
        let dates: Vec<NaiveDate> = february.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 2, 29)]);
    }

    #[tokio::test]
    async fn test_add_for_unknown_user_fails() {
        let (ledger, _user_id) = setup().await;
        let stranger = Uuid::new_v4();

        let result = ledger
            .add(stranger, date(2024, 1, 1), TransactionCategory::Income, "", Amount::zero())
            .await;
        assert!(matches!(result, Err(LedgerError::UserNotFound(id)) if id == stranger));
    }
}
