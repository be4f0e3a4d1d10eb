//! Category registry
//!
//! Owns the ordered set of category labels an expense may be tagged with.
//! Labels are case-sensitive, unique and never empty, and the registry
//! always contains [`UNCATEGORIZED`].

use tracing::{info, warn};

use crate::error::ValidationError;
use crate::models::UNCATEGORIZED;

/// Ordered set of valid category labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    labels: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            labels: vec![UNCATEGORIZED.to_string()],
        }
    }
}

impl CategoryRegistry {
    /// Create a registry holding only the default category
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from persisted labels
    ///
    /// Labels are trimmed; blanks and duplicates are dropped with a warning.
    /// [`UNCATEGORIZED`] is prepended if the input does not contain it.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self { labels: Vec::new() };

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if registry.contains(label) {
                warn!(label, "dropping duplicate category label");
                continue;
            }
            registry.labels.push(label.to_string());
        }

        if !registry.contains(UNCATEGORIZED) {
            registry.labels.insert(0, UNCATEGORIZED.to_string());
        }

        registry
    }

    /// Register a new category label
    ///
    /// Whitespace is trimmed. Empty labels and exact duplicates are rejected.
    pub fn add(&mut self, label: &str) -> Result<(), ValidationError> {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return Err(ValidationError::DuplicateOrEmpty(label.to_string()));
        }

        self.labels.push(label.to_string());
        info!(category = label, "added category");
        Ok(())
    }

    /// Remove a category label
    ///
    /// Expenses already tagged with the label keep it. [`UNCATEGORIZED`] is
    /// built in rather than user-registered, so removing it reports
    /// `NotFound` like any other label the user cannot remove.
    pub fn remove(&mut self, label: &str) -> Result<(), ValidationError> {
        let label = label.trim();
        let position = self
            .labels
            .iter()
            .position(|l| l == label && l != UNCATEGORIZED)
            .ok_or_else(|| ValidationError::NotFound(label.to_string()))?;

        self.labels.remove(position);
        info!(category = label, "removed category");
        Ok(())
    }

    /// Check whether a label is registered (exact, case-sensitive match)
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// All labels in registration order
    pub fn list(&self) -> &[String] {
        &self.labels
    }

    /// Number of registered labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; the default category is never removed
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
