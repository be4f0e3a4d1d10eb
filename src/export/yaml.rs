//! YAML Export functionality
//!
//! Exports the complete session to YAML for a human-readable backup.

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::json::FullExport;
use crate::services::Session;
use std::io::Write;

/// Export the full session to YAML format
pub fn export_full_yaml<W: Write>(session: &Session, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_session(session);
    let io_err = |e: std::io::Error| ExpenseError::Export(e.to_string());

    writeln!(writer, "# Expense Tracker Export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "# Amounts are exact decimals; reports round them to cents.").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
