//! Record categories
//!
//! Transactions are either income or expense; bills fall into a fixed set of
//! spending groups. Both are stored as lowercase text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Category of a ledger transaction. Decides the effect on the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Income,
    Expense,
}

impl TransactionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionCategory::Income => "income",
            TransactionCategory::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionCategory::Income),
            "expense" => Ok(TransactionCategory::Expense),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

/// Category of an upcoming bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillCategory {
    Utilities,
    Education,
    Entertainment,
    Other,
}

impl BillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillCategory::Utilities => "utilities",
            BillCategory::Education => "education",
            BillCategory::Entertainment => "entertainment",
            BillCategory::Other => "other",
        }
    }
}

impl fmt::Display for BillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utilities" => Ok(BillCategory::Utilities),
            "education" => Ok(BillCategory::Education),
            "entertainment" => Ok(BillCategory::Entertainment),
            "other" => Ok(BillCategory::Other),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_category_parse() {
        assert_eq!("Income".parse::<TransactionCategory>().unwrap(), TransactionCategory::Income);
        assert_eq!("expense".parse::<TransactionCategory>().unwrap(), TransactionCategory::Expense);
        assert!(matches!(
            "salary".parse::<TransactionCategory>(),
            Err(DomainError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_bill_category_round_trips_through_text() {
        for category in [
            BillCategory::Utilities,
            BillCategory::Education,
            BillCategory::Entertainment,
            BillCategory::Other,
        ] {
            assert_eq!(category.as_str().parse::<BillCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&BillCategory::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
        let category: TransactionCategory = serde_json::from_str("\"income\"").unwrap();
        assert_eq!(category, TransactionCategory::Income);
    }
}
