//! Expense display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the ledger as a table, numbered from 1 in insertion order
pub fn format_expense_table(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .enumerate()
        .map(|(idx, expense)| ExpenseRow {
            position: idx + 1,
            date: expense.date.format(date_format).to_string(),
            description: expense.description.clone(),
            category: expense.category.clone(),
            amount: expense.amount.format_with_symbol(symbol),
        })
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format_total(
        expenses.iter().map(|e| e.amount).sum(),
        symbol,
    ));
    output
}

/// One-line confirmation for a recorded or removed expense
pub fn format_expense_line(expense: &Expense, symbol: &str, date_format: &str) -> String {
    format!(
        "{} {} ({}) {}",
        expense.date.format(date_format),
        expense.description,
        expense.category,
        expense.amount.format_with_symbol(symbol)
    )
}

pub fn format_total(total: Money, symbol: &str) -> String {
    format!("Total Expenses: {}\n", total.format_with_symbol(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(day: u32, description: &str, cents: i64) -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            description,
            Money::from_cents(cents),
            "Food",
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_expense_table(&[], "$", "%Y-%m-%d"),
            "No expenses recorded.\n"
        );
    }

    #[test]
    fn test_table_rows_and_total() {
        let expenses = vec![expense(2, "Lunch", 1250), expense(1, "Snack", 300)];
        let output = format_expense_table(&expenses, "$", "%d/%m/%Y");

        assert!(output.contains("Description"));
        assert!(output.contains("02/05/2025"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("Total Expenses: $15.50"));
        assert!(output.find("Lunch").unwrap() < output.find("Snack").unwrap());
    }

    #[test]
    fn test_expense_line() {
        let line = format_expense_line(&expense(3, "Tea", -150), "₹", "%Y-%m-%d");
        assert_eq!(line, "2025-05-03 Tea (Food) -₹1.50");
    }
}
