//! BudgetBuddy Library
//!
//! Re-exports modules for the server binary and integration testing.

pub mod accounts;
pub mod api;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod handlers;
pub mod ledger;
pub mod reporting;

pub use config::Config;
pub use domain::{Amount, AmountError, DomainError, OperationContext, Summary};
pub use error::{AppError, AppResult, ErrorResponse};
