//! Persistence gateway for the expense tracker
//!
//! Ledger and registry snapshots are stored as CSV files under the data
//! directory. Every save is a full overwrite through an atomic rename; the
//! last successful save wins.

pub mod categories;
pub mod expenses;
pub mod file_io;

pub use categories::CategoryFile;
pub use expenses::{ExpenseFile, LoadReport, SchemaVersion, SkippedRow};
pub use file_io::{read_json, write_json_atomic};

use serde::Serialize;
use tracing::info;

use crate::audit::{AuditEntry, AuditLog, Change, EntityType};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;
use crate::services::{ExpenseLedger, Session};

/// Main storage coordinator over the expense and category files
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseFile,
    pub categories: CategoryFile,
    audit: AuditLog,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance with audit logging on
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseFile::new(paths.expenses_file()),
            categories: CategoryFile::new(paths.categories_file()),
            audit: AuditLog::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit_enabled = enabled;
    }

    /// The audit log, for reading history
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity: EntityType,
        label: impl Into<String>,
        record: &T,
    ) -> ExpenseResult<()> {
        self.log(|| {
            Ok(Change::Created {
                entity,
                label: label.into(),
                snapshot: serde_json::to_value(record)?,
            })
        })
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity: EntityType,
        label: impl Into<String>,
        record: &T,
    ) -> ExpenseResult<()> {
        self.log(|| {
            Ok(Change::Deleted {
                entity,
                label: label.into(),
                snapshot: serde_json::to_value(record)?,
            })
        })
    }

    pub fn log_reset(&self, expenses: usize, categories: usize) -> ExpenseResult<()> {
        self.log(|| {
            Ok(Change::Reset {
                expenses,
                categories,
            })
        })
    }

    fn log(&self, change: impl FnOnce() -> ExpenseResult<Change>) -> ExpenseResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.append(&AuditEntry::now(change()?))
    }

    /// Seed a session from disk
    ///
    /// The report lists rows that were skipped while reading the ledger.
    pub fn load_session(&self) -> ExpenseResult<(Session, LoadReport)> {
        let categories = self.categories.load()?;
        let mut report = self.expenses.load()?;
        let ledger = ExpenseLedger::from_expenses(std::mem::take(&mut report.expenses));

        Ok((Session::from_parts(ledger, categories), report))
    }

    /// Write both snapshots
    pub fn save_session(&self, session: &Session) -> ExpenseResult<()> {
        self.expenses.save(session.list_expenses())?;
        self.categories.save(&session.categories)?;
        Ok(())
    }

    /// Delete both data files
    pub fn reset(&self) -> ExpenseResult<()> {
        let expenses = self.expenses.remove()?;
        let categories = self.categories.remove()?;
        info!(expenses, categories, "deleted data files");
        Ok(())
    }
}
