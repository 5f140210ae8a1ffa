//! Bill Ledger
//!
//! Upcoming payments, ordered by due date then insertion.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{Amount, Bill, BillCategory};

use super::{map_insert_error, LedgerError};

type BillRow = (Uuid, Uuid, NaiveDate, String, String, String, DateTime<Utc>);

/// Repository for the bill ledger
#[derive(Debug, Clone)]
pub struct BillLedger {
    pool: SqlitePool,
}

impl BillLedger {
    /// Create a new BillLedger
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a bill to a user's ledger
    pub async fn add(
        &self,
        user_id: Uuid,
        due_date: NaiveDate,
        category: BillCategory,
        description: &str,
        amount: Amount,
    ) -> Result<Bill, LedgerError> {
        let bill = Bill {
            id: Uuid::new_v4(),
            user_id,
            due_date,
            category,
            description: description.to_string(),
            amount,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO bills (id, user_id, due_date, category, description, amount, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(bill.id)
        .bind(user_id)
        .bind(due_date)
        .bind(category.as_str())
        .bind(&bill.description)
        .bind(amount.to_string())
        .bind(bill.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, user_id))?;

        tracing::debug!(
            bill_id = %bill.id,
            user_id = %user_id,
            category = %category,
            due_date = %due_date,
            "Bill recorded"
        );

        Ok(bill)
    }

    /// All bills of a user, earliest due date first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Bill>, LedgerError> {
        let rows: Vec<BillRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, due_date, category, description, amount, created_at
            FROM bills
            WHERE user_id = ?
            ORDER BY due_date ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }

    /// Bills due on or after `from`, earliest first
    pub async fn list_due_from(
        &self,
        user_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Bill>, LedgerError> {
        let rows: Vec<BillRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, due_date, category, description, amount, created_at
            FROM bills
            WHERE user_id = ? AND due_date >= ?
            ORDER BY due_date ASC, rowid ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(from_row).collect()
    }
}

fn from_row(row: BillRow) -> Result<Bill, LedgerError> {
    let (id, user_id, due_date, category, description, amount, created_at) = row;
    let corrupt = |reason: String| LedgerError::CorruptRecord { id, reason };

    Ok(Bill {
        id,
        user_id,
        due_date,
        category: category
            .parse::<BillCategory>()
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (BillLedger, Uuid, SqlitePool) {
        let pool = db::connect_in_memory().await.unwrap();
        let user_id = AccountRepository::new(pool.clone())
            .create_user("alice", "pw")
            .await
            .unwrap();
        (BillLedger::new(pool.clone()), user_id, pool)
    }

    #[tokio::test]
    async fn test_add_and_list_in_due_order() {
        let (ledger, user_id, _pool) = setup().await;
        let amount = Amount::from_integer(150_000).unwrap();

        ledger.add(user_id, date(2024, 3, 10), BillCategory::Education, "Tuition", amount).await.unwrap();
        ledger.add(user_id, date(2024, 3, 1), BillCategory::Utilities, "Electricity", amount).await.unwrap();

        let bills = ledger.list(user_id).await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].description, "Electricity");
        assert_eq!(bills[0].category, BillCategory::Utilities);
        assert_eq!(bills[1].description, "Tuition");
        assert_eq!(bills[1].amount, amount);
    }

    #[tokio::test]
    async fn test_list_due_from_includes_boundary() {
        let (ledger, user_id, _pool) = setup().await;
        let amount = Amount::from_integer(1).unwrap();

        for d in [date(2024, 1, 9), date(2024, 1, 10), date(2024, 2, 1)] {
            ledger.add(user_id, d, BillCategory::Other, "", amount).await.unwrap();
        }

        let upcoming = ledger.list_due_from(user_id, date(2024, 1, 10)).await.unwrap();
        let dates: Vec<NaiveDate> = upcoming.iter().map(|b| b.due_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 10), date(2024, 2, 1)]);
    }

    #[tokio::test]
    async fn test_add_for_unknown_user_fails() {
        let (ledger, _user_id, _pool) = setup().await;
        let result = ledger
            .add(Uuid::new_v4(), date(2024, 1, 1), BillCategory::Other, "", Amount::zero())
            .await;
        assert!(matches!(result, Err(LedgerError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_corrupt_amount_is_reported() {
        let (ledger, user_id, pool) = setup().await;
        let bill = ledger
            .add(user_id, date(2024, 1, 1), BillCategory::Other, "", Amount::zero())
            .await
            .unwrap();

        sqlx::query("UPDATE bills SET amount = 'lots' WHERE id = ?")
            .bind(bill.id)
            .execute(&pool)
            .await
            .unwrap();

        let result = ledger.list(user_id).await;
        assert!(matches!(result, Err(LedgerError::CorruptRecord { id, .. }) if id == bill.id));
    }
}
