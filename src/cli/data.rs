//! Data maintenance commands
//!
//! `history` and `reset`.

use crate::error::ExpenseResult;
use crate::services::Session;
use crate::storage::Storage;

/// Show the most recent audit entries, oldest first
pub fn handle_history(storage: &Storage, limit: usize) -> ExpenseResult<()> {
    let entries = storage.audit().recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}

/// Delete every expense and category
pub fn handle_reset(storage: &Storage, session: &mut Session, force: bool) -> ExpenseResult<()> {
    if !force {
        println!("This deletes all expenses and categories.");
        println!("Re-run with --force to confirm.");
        return Ok(());
    }

    let expenses = session.list_expenses().len();
    let categories = session.list_categories().len();

    storage.reset()?;
    session.reset();
    storage.log_reset(expenses, categories)?;

    println!("Data has been reset.");
    println!(
        "Removed {} expense(s) and {} category label(s).",
        expenses, categories
    );
    Ok(())
}
