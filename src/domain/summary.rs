//! Summary aggregation
//!
//! Derives income, expense and balance from a user's transactions.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Transaction, TransactionCategory, YearMonth};

/// Aggregated totals over a set of transactions.
///
/// `income` and `expense` are never negative; `balance` may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Income vs. expense split in percent, one decimal place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shares {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Summary {
    /// Totals of an empty ledger
    pub fn zero() -> Self {
        Self {
            income: Decimal::new(0, 2),
            expense: Decimal::new(0, 2),
            balance: Decimal::new(0, 2),
        }
    }

    /// Sum transactions by category. Order of the input does not matter.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().fold(
            (Decimal::new(0, 2), Decimal::new(0, 2)),
            |(income, expense), tx| match tx.category {
                TransactionCategory::Income => (income + tx.amount.value(), expense),
                TransactionCategory::Expense => (income, expense + tx.amount.value()),
            },
        );

        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Percent split for an income vs. expense pie chart.
    ///
    /// Returns `None` when there is nothing to chart.
    pub fn shares(&self) -> Option<Shares> {
        let total = self.income + self.expense;
        if total.is_zero() {
            return None;
        }

        let hundred = Decimal::ONE_HUNDRED;
        let income = (self.income * hundred / total).round_dp(1);
        let expense = (self.expense * hundred / total).round_dp(1);
        Some(Shares { income, expense })
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::zero()
    }
}

/// Distinct months that have at least one transaction, oldest first
pub fn months_with_activity<'a, I>(transactions: I) -> Vec<YearMonth>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|tx| YearMonth::of(tx.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Amount;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tx(date: (i32, u32, u32), category: TransactionCategory, amount: i64) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            description: String::new(),
            amount: Amount::from_integer(amount).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_yields_zeros() {
        let summary = Summary::from_transactions(&Vec::<Transaction>::new());
        assert_eq!(summary, Summary::zero());
        assert!(summary.balance.is_zero());
        assert!(summary.shares().is_none());
    }

    #[test]
    fn test_income_and_expense_example() {
        let transactions = vec![
            tx((2024, 1, 1), TransactionCategory::Income, 5_000_000),
            tx((2024, 1, 2), TransactionCategory::Expense, 2_000_000),
        ];

        let summary = Summary::from_transactions(&transactions);
        assert_eq!(summary.income, dec!(5000000));
        assert_eq!(summary.expense, dec!(2000000));
        assert_eq!(summary.balance, dec!(3000000));

        let shares = summary.shares().unwrap();
        assert_eq!(shares.income, dec!(71.4));
        assert_eq!(shares.expense, dec!(28.6));
    }

    #[test]
    fn test_each_addition_moves_one_total_exactly() {
        let mut transactions = vec![tx((2024, 1, 1), TransactionCategory::Income, 100)];
        let before = Summary::from_transactions(&transactions);

        transactions.push(tx((2024, 1, 3), TransactionCategory::Income, 250));
        let after_income = Summary::from_transactions(&transactions);
        assert_eq!(after_income.income - before.income, dec!(250));
        assert_eq!(after_income.expense, before.expense);

        transactions.push(tx((2024, 1, 4), TransactionCategory::Expense, 40));
        let after_expense = Summary::from_transactions(&transactions);
        assert_eq!(after_expense.expense - after_income.expense, dec!(40));
        assert_eq!(after_expense.income, after_income.income);
    }

    #[test]
    fn test_balance_is_order_independent() {
        let mut transactions = vec![
            tx((2024, 3, 1), TransactionCategory::Expense, 700),
            tx((2024, 1, 1), TransactionCategory::Income, 300),
            tx((2024, 2, 1), TransactionCategory::Expense, 5),
            tx((2024, 2, 9), TransactionCategory::Income, 1000),
        ];

        let forward = Summary::from_transactions(&transactions);
        transactions.reverse();
        let backward = Summary::from_transactions(&transactions);

        assert_eq!(forward, backward);
        assert_eq!(forward.balance, forward.income - forward.expense);
        assert_eq!(forward.balance, dec!(595));
    }

    #[test]
    fn test_negative_balance() {
        let transactions = vec![tx((2024, 1, 1), TransactionCategory::Expense, 10)];
        let summary = Summary::from_transactions(&transactions);
        assert_eq!(summary.balance, dec!(-10));

        let shares = summary.shares().unwrap();
        assert_eq!(shares.income, dec!(0));
        assert_eq!(shares.expense, dec!(100));
    }

    #[test]
    fn test_zero_amounts_have_no_shares() {
        let transactions = vec![tx((2024, 1, 1), TransactionCategory::Income, 0)];
        assert!(Summary::from_transactions(&transactions).shares().is_none());
    }

    #[test]
    fn test_months_with_activity_sorted_and_distinct() {
        let transactions = vec![
            tx((2024, 3, 10), TransactionCategory::Income, 1),
            tx((2023, 12, 31), TransactionCategory::Expense, 1),
            tx((2024, 3, 1), TransactionCategory::Expense, 1),
        ];

        let months: Vec<String> = months_with_activity(&transactions)
            .into_iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2023-12", "2024-03"]);
    }
}
