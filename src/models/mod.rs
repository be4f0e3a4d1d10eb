//! Core data models for the expense tracker
//!
//! Value types shared by the ledger, the reports and the storage layer.

pub mod expense;
pub mod money;
pub mod month;

pub use expense::{Expense, UNCATEGORIZED};
pub use money::{Money, MoneyParseError};
pub use month::Month;
