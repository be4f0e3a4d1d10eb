//! Audit records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of record a change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    Category,
    Ledger,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Expense => "Expense",
            EntityType::Category => "Category",
            EntityType::Ledger => "Ledger",
        })
    }
}

/// A mutation of the ledger or the category registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum Change {
    /// `snapshot` holds the record as it was stored
    Created {
        entity: EntityType,
        label: String,
        snapshot: serde_json::Value,
    },
    /// `snapshot` holds the record as it was before removal
    Deleted {
        entity: EntityType,
        label: String,
        snapshot: serde_json::Value,
    },
    /// Both files were wiped; the counts are what was discarded
    Reset { expenses: usize, categories: usize },
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub change: Change,
}

impl AuditEntry {
    /// Stamp a change with the current time
    pub fn now(change: Change) -> Self {
        Self {
            timestamp: Utc::now(),
            change,
        }
    }

    pub fn entity(&self) -> EntityType {
        match &self.change {
            Change::Created { entity, .. } | Change::Deleted { entity, .. } => *entity,
            Change::Reset { .. } => EntityType::Ledger,
        }
    }
}

/// `[2025-01-10 09:30:00 UTC] CREATE Expense (Lunch)`
impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        match &self.change {
            Change::Created { entity, label, .. } => write!(f, "CREATE {} ({})", entity, label),
            Change::Deleted { entity, label, .. } => write!(f, "DELETE {} ({})", entity, label),
            Change::Reset {
                expenses,
                categories,
            } => write!(
                f,
                "RESET {} ({} expenses, {} categories)",
                EntityType::Ledger,
                expenses,
                categories
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at_noon(change: Change) -> AuditEntry {
        AuditEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap(),
            change,
        }
    }

    #[test]
    fn test_display() {
        let created = at_noon(Change::Created {
            entity: EntityType::Expense,
            label: "Lunch".into(),
            snapshot: json!({"amount": "12.50"}),
        });
        assert_eq!(created.to_string(), "[2025-01-10 12:00:00 UTC] CREATE Expense (Lunch)");

        let deleted = at_noon(Change::Deleted {
            entity: EntityType::Category,
            label: "Food".into(),
            snapshot: json!("Food"),
        });
        assert!(deleted.to_string().ends_with("DELETE Category (Food)"));

        let reset = at_noon(Change::Reset {
            expenses: 4,
            categories: 2,
        });
        assert!(reset
            .to_string()
            .ends_with("RESET Ledger (4 expenses, 2 categories)"));
    }

    #[test]
    fn test_entity() {
        let reset = AuditEntry::now(Change::Reset {
            expenses: 0,
            categories: 1,
        });
        assert_eq!(reset.entity(), EntityType::Ledger);
    }

    #[test]
    fn test_json_shape() {
        let entry = at_noon(Change::Created {
            entity: EntityType::Category,
            label: "Travel".into(),
            snapshot: json!("Travel"),
        });

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["change"], "created");
        assert_eq!(value["entity"], "category");
        assert_eq!(value["timestamp"], "2025-01-10T12:00:00Z");

        let back: AuditEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
