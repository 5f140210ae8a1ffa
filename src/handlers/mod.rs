//! Command Handlers module
//!
//! Handlers validate commands and coordinate the repositories that carry
//! them out. Each handler acts on behalf of the user in the given context.

mod account_handler;
mod commands;
mod ledger_handler;


pub use account_handler::{LoginHandler, LogoutHandler, RegisterHandler};
pub use commands::*;
pub use ledger_handler::{AddBillHandler, AddTransactionHandler};
