//! Category CLI commands

use clap::Subcommand;

use crate::audit::EntityType;
use crate::display::category::format_category_list;
use crate::error::ExpenseResult;
use crate::services::Session;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List registered categories
    List,

    /// Register a new category
    Add {
        /// Category label (case-sensitive)
        label: String,
    },

    /// Unregister a category; existing expenses keep their label
    Remove {
        /// Category label
        label: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    session: &mut Session,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(session.list_categories()));
        }

        CategoryCommands::Add { label } => {
            session.add_category(&label)?;
            storage.save_session(session)?;
            let label = label.trim();
            storage.log_create(EntityType::Category, label, &label)?;
            println!("Added category: {}", label);
        }

        CategoryCommands::Remove { label } => {
            session.remove_category(&label)?;
            storage.save_session(session)?;
            let label = label.trim();
            storage.log_delete(EntityType::Category, label, &label)?;

            let orphaned = session
                .list_expenses()
                .iter()
                .filter(|e| e.category == label)
                .count();
            println!("Removed category: {}", label);
            if orphaned > 0 {
                println!(
                    "Note: {} existing expense(s) still use '{}'.",
                    orphaned, label
                );
            }
        }
    }

    Ok(())
}
