//! JSON Export functionality
//!
//! Exports the complete session to JSON format with schema versioning.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};
use crate::services::Session;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Expenses in ledger order; amounts are exact decimal strings
    pub expenses: Vec<Expense>,

    /// Registered category labels in registry order
    pub categories: Vec<String>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub category_count: usize,
    pub total: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    /// Snapshot a session
    pub fn from_session(session: &Session) -> Self {
        let expenses = session.list_expenses().to_vec();
        let categories = session.list_categories().to_vec();

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            category_count: categories.len(),
            total: session.total_expenses(),
            earliest_expense: expenses.iter().map(|e| e.date).min(),
            latest_expense: expenses.iter().map(|e| e.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            categories,
            metadata,
        }
    }
}

/// Export the full session to JSON
pub fn export_full_json<W: Write>(
    session: &Session,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = FullExport::from_session(session);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
