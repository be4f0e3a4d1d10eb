//! Session: the operation surface offered to the host
//!
//! A session owns the ledger and the category registry for one run of the
//! host. The host calls these methods synchronously and is responsible for
//! persisting the session afterwards.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::category::CategoryRegistry;
use super::ledger::ExpenseLedger;
use crate::error::{ForecastError, ValidationError};
use crate::models::{Expense, Money};
use crate::reports::aggregation::{self, DatedAmount, MonthlyTotal};
use crate::reports::forecast::{self, Forecast, Granularity};

/// Ledger plus category registry for one host session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub ledger: ExpenseLedger,
    pub categories: CategoryRegistry,
}

impl Session {
    /// An empty ledger with the default registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a session from loaded parts
    pub fn from_parts(ledger: ExpenseLedger, categories: CategoryRegistry) -> Self {
        Self { ledger, categories }
    }

    // === Expenses ===

    /// Validate and record a new expense
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> Result<Expense, ValidationError> {
        self.ledger
            .add(&self.categories, date, description, amount_text, category)
    }

    /// Remove the expense at a zero-based position
    pub fn remove_expense_at(&mut self, index: usize) -> Result<Expense, ValidationError> {
        self.ledger.remove_at(index)
    }

    /// Sum of all recorded amounts
    pub fn total_expenses(&self) -> Money {
        self.ledger.total()
    }

    /// All expenses in insertion order
    pub fn list_expenses(&self) -> &[Expense] {
        self.ledger.all()
    }

    // === Categories ===

    pub fn list_categories(&self) -> &[String] {
        self.categories.list()
    }

    pub fn add_category(&mut self, label: &str) -> Result<(), ValidationError> {
        self.categories.add(label)
    }

    /// Unregister a category; expenses tagged with it are left as they are
    pub fn remove_category(&mut self, label: &str) -> Result<(), ValidationError> {
        self.categories.remove(label)
    }

    // === Reports ===

    pub fn aggregate_by_category(&self) -> HashMap<String, Money> {
        aggregation::total_by_category(self.ledger.all())
    }

    pub fn aggregate_by_date(&self) -> Vec<DatedAmount> {
        aggregation::series_by_date(self.ledger.all())
    }

    pub fn aggregate_by_month(&self) -> Vec<MonthlyTotal> {
        aggregation::monthly_totals(self.ledger.all())
    }

    pub fn forecast(
        &self,
        horizon: usize,
        granularity: Granularity,
    ) -> Result<Forecast, ForecastError> {
        forecast::forecast(self.ledger.all(), horizon, granularity)
    }

    /// Drop every expense and restore the default registry
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.categories = CategoryRegistry::new();
    }
}
