//! Reporting module
//!
//! Read models over the ledgers and file exports.

pub mod export;
mod service;

pub use export::ExportError;
pub use service::{Dashboard, ReportService, SummaryReport};
