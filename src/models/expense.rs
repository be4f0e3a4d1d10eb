//! Expense model
//!
//! A single recorded monetary transaction. Expenses are immutable once
//! stored in the ledger; corrections are made by removing the record and
//! adding a new one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Category assigned when none is given
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Calendar date of the expense
    pub date: NaiveDate,

    /// What the money was spent on
    pub description: String,

    /// Amount spent (negative for refunds and corrections)
    pub amount: Money,

    /// Category label
    pub category: String,
}

impl Expense {
    /// Create a new expense
    ///
    /// An empty category falls back to [`UNCATEGORIZED`].
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let category = if category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            category
        };

        Self {
            date,
            description: description.into(),
            amount,
            category,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Description: {}, Amount: {}, Category: {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category
        )
    }
}
