//! Expense ledger
//!
//! Validated create/remove over the ordered sequence of expenses. The
//! sequence keeps insertion order; reports sort their own copies.

use chrono::NaiveDate;
use tracing::{info, warn};

use super::category::CategoryRegistry;
use crate::error::ValidationError;
use crate::models::{Expense, Money, UNCATEGORIZED};

/// Ordered collection of recorded expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a ledger from previously stored expenses, keeping their order
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Validate input and append a new expense
    ///
    /// `amount_text` must parse as a decimal number within the range
    /// [`Money::parse`] accepts. An empty `category`, or one that is not
    /// registered in `categories`, falls back to the default category.
    pub fn add(
        &mut self,
        categories: &CategoryRegistry,
        date: NaiveDate,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> Result<Expense, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let amount_text = amount_text.trim();
        if amount_text.is_empty() {
            return Err(ValidationError::MissingField("amount"));
        }

        let amount = Money::parse(amount_text)
            .map_err(|_| ValidationError::InvalidAmount(amount_text.to_string()))?;

        let mut category = category.trim();
        if !category.is_empty() && !categories.contains(category) {
            warn!(category, "unregistered category, recording as {}", UNCATEGORIZED);
            category = UNCATEGORIZED;
        }

        let expense = Expense::new(date, description, amount, category);
        self.expenses.push(expense.clone());

        info!(
            date = %expense.date,
            description = %expense.description,
            amount = %expense.amount,
            category = %expense.category,
            "added expense"
        );
        Ok(expense)
    }

    /// Remove the expense at `index`, returning it
    pub fn remove_at(&mut self, index: usize) -> Result<Expense, ValidationError> {
        if index >= self.expenses.len() {
            return Err(ValidationError::SelectionRequired {
                index,
                len: self.expenses.len(),
            });
        }

        let removed = self.expenses.remove(index);
        info!(
            index,
            description = %removed.description,
            amount = %removed.amount,
            "removed expense"
        );
        Ok(removed)
    }

    /// Sum of all amounts (zero when empty)
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// All expenses in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Drop every expense
    pub fn clear(&mut self) {
        self.expenses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn registry() -> CategoryRegistry {
        CategoryRegistry::from_labels(["Food", "Travel"])
    }

    fn sample_ledger() -> ExpenseLedger {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        ledger.add(&categories, date(1), "Groceries", "40.00", "Food").unwrap();
        ledger.add(&categories, date(2), "Train", "12.50", "Travel").unwrap();
        ledger.add(&categories, date(3), "Coffee", "3.20", "Food").unwrap();
        ledger
    }

    #[test]
    fn test_add_appends_record_and_updates_total() {
        let categories = registry();
        let mut ledger = sample_ledger();
        let before = ledger.total();

        let expense = ledger
            .add(&categories, date(4), "Taxi", "18.75", "Travel")
            .unwrap();

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.all().last(), Some(&expense));
        assert_eq!(expense.description, "Taxi");
        assert_eq!(expense.amount, Money::from_cents(1875));
        assert_eq!(expense.category, "Travel");
        assert_eq!(ledger.total(), before + Money::from_cents(1875));
    }

    #[test]
    fn test_add_empty_category_defaults() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        let expense = ledger.add(&categories, date(1), "Misc", "5", "").unwrap();
        assert_eq!(expense.category, UNCATEGORIZED);
    }

    #[test]
    fn test_add_accepts_negative_amount() {
        let categories = registry();
        let mut ledger = sample_ledger();
        ledger.add(&categories, date(5), "Refund", "-10.00", "Food").unwrap();
        assert_eq!(ledger.total(), Money::from_cents(4000 + 1250 + 320 - 1000));
    }

    #[test]
    fn test_add_invalid_amount() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        let err = ledger
            .add(&categories, date(1), "Lunch", "abc", "Food")
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidAmount("abc".into()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_missing_fields() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();

        assert_eq!(
            ledger.add(&categories, date(1), "  ", "10", "Food"),
            Err(ValidationError::MissingField("description"))
        );
        assert_eq!(
            ledger.add(&categories, date(1), "Lunch", "", "Food"),
            Err(ValidationError::MissingField("amount"))
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_unknown_category_defaults() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        let expense = ledger.add(&categories, date(1), "Lunch", "10", "Rent").unwrap();
        assert_eq!(expense.category, UNCATEGORIZED);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_total_keeps_entered_precision() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        for day in 1..=3 {
            ledger.add(&categories, date(day), "Stamp", "1.004", "").unwrap();
        }
        ledger.add(&categories, date(4), "Fee", "0.004", "").unwrap();

        assert_eq!(ledger.all()[3].amount.to_string(), "0.004");
        assert_eq!(ledger.total().to_string(), "3.016");
    }

    #[test]
    fn test_add_accepts_exponent_amount() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        let expense = ledger.add(&categories, date(1), "Laptop", "1e3", "").unwrap();
        assert_eq!(expense.amount, Money::from_cents(100_000));
    }

    #[test]
    fn test_add_rejects_huge_amount() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        for _ in 0..2 {
            assert_eq!(
                ledger.add(&categories, date(1), "Yacht", "90000000000000000", ""),
                Err(ValidationError::InvalidAmount("90000000000000000".into()))
            );
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), Money::zero());
    }

    #[test]
    fn test_total_of_largest_amounts() {
        let categories = registry();
        let mut ledger = ExpenseLedger::new();
        for _ in 0..2 {
            ledger
                .add(&categories, date(1), "Estate", "1000000000000000", "")
                .unwrap();
        }
        assert_eq!(ledger.total().to_string(), "2000000000000000.00");
    }

    #[test]
    fn test_remove_at_preserves_order() {
        let mut ledger = sample_ledger();
        let original = ledger.all().to_vec();

        let removed = ledger.remove_at(1).unwrap();

        assert_eq!(removed, original[1]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all(), &[original[0].clone(), original[2].clone()]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut ledger = sample_ledger();
        assert_eq!(
            ledger.remove_at(3),
            Err(ValidationError::SelectionRequired { index: 3, len: 3 })
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(ExpenseLedger::new().total(), Money::zero());
    }

    #[test]
    fn test_clear() {
        let mut ledger = sample_ledger();
        ledger.clear();
        assert!(ledger.is_empty());
    }
}
