//! Domain module
//!
//! Core domain types and business logic.

pub mod amount;
pub mod category;
pub mod context;
pub mod error;
pub mod month;
pub mod records;
pub mod summary;

pub use amount::{Amount, AmountError};
pub use category::{BillCategory, TransactionCategory};
pub use context::OperationContext;
pub use error::DomainError;
pub use month::YearMonth;
pub use records::{Bill, Transaction, User};
pub use summary::{months_with_activity, Shares, Summary};
