//! Category file gateway for categories.csv
//!
//! One label per row under an optional `Category` header. A missing file
//! means the default registry.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::services::CategoryRegistry;

use super::file_io::{remove_if_exists, write_bytes_atomic};

/// Header row of the category file
pub const CATEGORY_HEADER: &str = "Category";

/// Reads and writes the category CSV file
#[derive(Debug, Clone)]
pub struct CategoryFile {
    path: PathBuf,
}

impl CategoryFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the registry, falling back to the default when absent
    pub fn load(&self) -> ExpenseResult<CategoryRegistry> {
        if !self.path.exists() {
            return Ok(CategoryRegistry::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let registry = CategoryRegistry::from_labels(read_labels(file));
        info!(path = %self.path.display(), count = registry.len(), "loaded categories");
        Ok(registry)
    }

    /// Overwrite the file with the registry's labels
    pub fn save(&self, registry: &CategoryRegistry) -> ExpenseResult<()> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record([CATEGORY_HEADER])?;
        for label in registry.list() {
            writer.write_record([label])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExpenseError::Csv(format!("Failed to finish category file: {}", e)))?;

        write_bytes_atomic(&self.path, &bytes)?;
        info!(path = %self.path.display(), count = registry.len(), "saved categories");
        Ok(())
    }

    /// Delete the file if present
    pub fn remove(&self) -> ExpenseResult<bool> {
        remove_if_exists(&self.path)
    }
}

/// First column of every non-blank row, header excluded
pub fn read_labels<R: Read>(reader: R) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut labels = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping unreadable category row");
                continue;
            }
        };

        let label = record.get(0).map(str::trim).unwrap_or_default();
        if idx == 0 && label == CATEGORY_HEADER {
            continue;
        }
        if !label.is_empty() {
            labels.push(label.to_string());
        }
    }

    labels
}
