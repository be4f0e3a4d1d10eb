//! Expense CLI commands
//!
//! `add`, `remove`, `list` and `total`.

use chrono::NaiveDate;
use clap::Args;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::display::expense::{format_expense_line, format_expense_table, format_total};
use crate::error::{ExpenseResult, ValidationError};
use crate::services::Session;
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    pub description: String,
    /// Amount (e.g., "12.50"; negative for refunds)
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Category label; unregistered labels are recorded as Uncategorized
    #[arg(short, long)]
    pub category: Option<String>,
    /// Expense date (YYYY-MM-DD), defaults to today
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

/// Arguments for `remove`
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Position of the expense as shown by `list` (starting at 1)
    pub index: usize,
}

/// Parse a `YYYY-MM-DD` command-line date
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
}

pub fn handle_add(
    storage: &Storage,
    session: &mut Session,
    settings: &Settings,
    args: AddArgs,
) -> ExpenseResult<()> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let category = args.category.unwrap_or_default();

    let expense = session.add_expense(date, &args.description, &args.amount, &category)?;
    storage.save_session(session)?;
    storage.log_create(EntityType::Expense, expense.description.clone(), &expense)?;

    println!(
        "Added expense: {}",
        format_expense_line(&expense, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_remove(
    storage: &Storage,
    session: &mut Session,
    settings: &Settings,
    args: RemoveArgs,
) -> ExpenseResult<()> {
    let len = session.list_expenses().len();
    if args.index == 0 || args.index > len {
        return Err(ValidationError::SelectionRequired {
            index: args.index,
            len,
        }
        .into());
    }

    let expense = session.remove_expense_at(args.index - 1)?;
    storage.save_session(session)?;
    storage.log_delete(EntityType::Expense, expense.description.clone(), &expense)?;

    println!(
        "Removed expense: {}",
        format_expense_line(&expense, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

pub fn handle_list(session: &Session, settings: &Settings) -> ExpenseResult<()> {
    print!(
        "{}",
        format_expense_table(
            session.list_expenses(),
            &settings.currency_symbol,
            &settings.date_format
        )
    );
    Ok(())
}

pub fn handle_total(session: &Session, settings: &Settings) -> ExpenseResult<()> {
    print!(
        "{}",
        format_total(session.total_expenses(), &settings.currency_symbol)
    );
    Ok(())
}
