//! CSV export of ledgers
//!
//! One header row, then one row per record in ledger order.

use serde::Serialize;

use crate::domain::{Bill, Transaction};

/// Export errors
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

#[derive(Serialize)]
struct TransactionCsvRow<'a> {
    date: String,
    category: &'static str,
    description: &'a str,
    amount: String,
}

#[derive(Serialize)]
struct BillCsvRow<'a> {
    due_date: String,
    category: &'static str,
    description: &'a str,
    amount: String,
}

/// Render transactions as CSV
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    write_csv(
        &["date", "category", "description", "amount"],
        transactions.iter().map(|tx| TransactionCsvRow {
            date: tx.date.format("%Y-%m-%d").to_string(),
            category: tx.category.as_str(),
            description: &tx.description,
            amount: tx.amount.to_string(),
        }),
    )
}

/// Render bills as CSV
pub fn bills_csv(bills: &[Bill]) -> Result<String, ExportError> {
    write_csv(
        &["due_date", "category", "description", "amount"],
        bills.iter().map(|bill| BillCsvRow {
            due_date: bill.due_date.format("%Y-%m-%d").to_string(),
            category: bill.category.as_str(),
            description: &bill.description,
            amount: bill.amount.to_string(),
        }),
    )
}

/// Header is written explicitly so empty ledgers still export a header row
fn write_csv<R, I>(header: &[&str], rows: I) -> Result<String, ExportError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}
