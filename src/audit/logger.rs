//! Append-only audit log, one JSON object per line

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entry::AuditEntry;
use crate::error::{ExpenseError, ExpenseResult};

/// The `audit.log` file
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single write
    pub fn append(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ExpenseError::Io(format!("Failed to create audit directory: {}", e)))?;
        }

        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| {
                ExpenseError::Io(format!(
                    "Failed to append to audit log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        debug!(entity = %entry.entity(), "appended audit entry");
        Ok(())
    }

    /// The last `limit` entries, oldest first
    ///
    /// The file is streamed; only the trailing window is kept in memory.
    pub fn recent(&self, limit: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ExpenseError::Io(format!("Failed to open audit log: {}", e))),
        };
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut window = VecDeque::new();
        let stream = serde_json::Deserializer::from_reader(BufReader::new(file));
        for entry in stream.into_iter::<AuditEntry>() {
            let entry = entry.map_err(|e| {
                ExpenseError::Json(format!("Corrupt audit log at line {}: {}", e.line(), e))
            })?;
            if window.len() == limit {
                window.pop_front();
            }
            window.push_back(entry);
        }

        Ok(window.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Change, EntityType};
    use serde_json::json;
    use tempfile::TempDir;

    fn category_added(label: &str) -> AuditEntry {
        AuditEntry::now(Change::Created {
            entity: EntityType::Category,
            label: label.to_string(),
            snapshot: json!(label),
        })
    }

    fn labels(entries: &[AuditEntry]) -> Vec<String> {
        entries
            .iter()
            .filter_map(|e| match &e.change {
                Change::Created { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_append_writes_one_line_per_entry() {
        let temp = TempDir::new().unwrap();
        let log = AuditLog::new(temp.path().join("nested").join("audit.log"));

        log.append(&category_added("Food")).unwrap();
        log.append(&AuditEntry::now(Change::Reset {
            expenses: 3,
            categories: 2,
        }))
        .unwrap();

        let text = fs::read_to_string(log.path()).unwrap();
        assert_eq!(text.lines().count(), 2);

        let entries = log.recent(10).unwrap();
        assert_eq!(labels(&entries), ["Food"]);
        assert_eq!(entries[1].entity(), EntityType::Ledger);
    }

    #[test]
    fn test_recent_keeps_trailing_window() {
        let temp = TempDir::new().unwrap();
        let log = AuditLog::new(temp.path().join("audit.log"));

        for i in 0..10 {
            log.append(&category_added(&format!("Category {}", i))).unwrap();
        }

        assert_eq!(
            labels(&log.recent(3).unwrap()),
            ["Category 7", "Category 8", "Category 9"]
        );
        assert!(log.recent(0).unwrap().is_empty());
    }

    #[test]
    fn test_missing_log_is_empty() {
        let temp = TempDir::new().unwrap();
        let log = AuditLog::new(temp.path().join("audit.log"));

        assert!(log.recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let temp = TempDir::new().unwrap();
        let log = AuditLog::new(temp.path().join("audit.log"));
        log.append(&category_added("Food")).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "{{not json}}").unwrap();

        match log.recent(5) {
            Err(ExpenseError::Json(msg)) => assert!(msg.contains("line 2")),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }
}
