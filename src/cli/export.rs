//! CLI commands for data export

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{json, yaml};
use crate::services::Session;
use crate::storage::Storage;
use clap::{Args, ValueEnum};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (defaults to a dated file in the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export(storage: &Storage, session: &Session, args: ExportArgs) -> ExpenseResult<()> {
    let output = match args.output {
        Some(path) => path,
        None => {
            let dir = storage.paths().export_dir();
            fs::create_dir_all(&dir).map_err(|e| {
                ExpenseError::Export(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            dir.join(format!(
                "expenses-{}.{}",
                chrono::Local::now().format("%Y%m%d-%H%M%S"),
                args.format.extension()
            ))
        }
    };

    let file = File::create(&output).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Json => json::export_full_json(session, &mut writer, args.pretty)?,
        ExportFormat::Yaml => yaml::export_full_yaml(session, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to flush export: {}", e)))?;

    println!(
        "Exported {} expense(s) to: {}",
        session.list_expenses().len(),
        output.display()
    );
    Ok(())
}
