//! Aggregation over a ledger snapshot
//!
//! Pure functions: totals by category, the chronological series, and
//! calendar-month buckets. Inputs are never mutated; sorting happens on
//! copies.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, Money, Month};

/// Sum of amounts for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    /// Number of expenses in the category
    pub count: usize,
    /// Share of the grand total, in percent (0 when the grand total is 0)
    pub percentage: f64,
}

/// One point of the chronological series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
}

/// Sum of amounts for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: Money,
}

/// Sum of amounts per category
///
/// Only categories that occur in `expenses` get an entry.
pub fn total_by_category(expenses: &[Expense]) -> HashMap<String, Money> {
    let mut totals: HashMap<String, Money> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    totals
}

/// Category totals in presentation order
///
/// Sorted by descending total, ties broken by label.
pub fn category_summary(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut grouped: HashMap<&str, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = grouped
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let grand_total: Money = expenses.iter().map(|e| e.amount).sum();

    let mut summary: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
            percentage: if grand_total.is_zero() {
                0.0
            } else {
                total.to_f64() / grand_total.to_f64() * 100.0
            },
        })
        .collect();

    summary.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    summary
}

/// Expenses as a chronological series
///
/// Ascending by date; expenses on the same date keep their ledger order.
pub fn series_by_date(expenses: &[Expense]) -> Vec<DatedAmount> {
    let mut series: Vec<DatedAmount> = expenses
        .iter()
        .map(|e| DatedAmount {
            date: e.date,
            amount: e.amount,
            category: e.category.clone(),
        })
        .collect();

    // sort_by_key is stable
    series.sort_by_key(|point| point.date);
    series
}

/// Totals per calendar month, ascending, months without expenses omitted
pub fn monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<Month, Money> = BTreeMap::new();
    for expense in expenses {
        *buckets.entry(Month::from_date(expense.date)).or_default() += expense.amount;
    }

    buckets
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Totals per calendar month with empty months between the first and last
/// observed month filled with zero
pub fn dense_monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let sparse = monthly_totals(expenses);
    let (Some(first), Some(last)) = (sparse.first(), sparse.last()) else {
        return Vec::new();
    };

    let span = last.month.months_since(first.month);
    let mut observed = sparse.iter().peekable();
    let mut dense = Vec::with_capacity(span as usize + 1);

    for step in 0..=span {
        let month = first.month.offset(step);
        let total = match observed.peek() {
            Some(bucket) if bucket.month == month => {
                let total = bucket.total;
                observed.next();
                total
            }
            _ => Money::zero(),
        };
        dense.push(MonthlyTotal { month, total });
    }

    dense
}
