//! Audit log of ledger and registry mutations
//!
//! - `AuditEntry`: a timestamped `Change` with a snapshot of the record
//! - `AuditLog`: appends entries to `audit.log` as JSON lines

mod entry;
mod logger;

pub use entry::{AuditEntry, Change, EntityType};
pub use logger::AuditLog;
