//! Expense file gateway for expenses.csv
//!
//! Rows are `Date, Description, Amount, Category`. Files written before
//! categories existed carry only the first three columns; those rows load
//! into `Uncategorized`. Rows that cannot be decoded are skipped and
//! reported instead of failing the whole load.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

use super::file_io::{remove_if_exists, write_bytes_atomic};

/// Header written at the top of every saved expense file
pub const EXPENSE_HEADER: [&str; 4] = ["Date", "Description", "Amount", "Category"];

/// Date encoding used in the file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row layouts the reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// `Date, Description, Amount`
    Legacy,
    /// `Date, Description, Amount, Category`
    Categorized,
}

impl SchemaVersion {
    /// Detect the layout from a row's column count
    pub fn from_columns(columns: usize) -> Option<Self> {
        match columns {
            3 => Some(Self::Legacy),
            4 => Some(Self::Categorized),
            _ => None,
        }
    }
}

/// A row that was left out of the loaded ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line in the file
    pub line: u64,
    pub reason: String,
}

/// Outcome of reading an expense file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub expenses: Vec<Expense>,
    pub skipped: Vec<SkippedRow>,
    /// Layout announced by the header row, if the file had one
    pub header: Option<SchemaVersion>,
}

/// Reads and writes the expense CSV file
#[derive(Debug, Clone)]
pub struct ExpenseFile {
    path: PathBuf,
}

impl ExpenseFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load all decodable rows; a missing file is an empty ledger
    pub fn load(&self) -> ExpenseResult<LoadReport> {
        if !self.path.exists() {
            return Ok(LoadReport::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let report = read_expenses(file);
        info!(
            path = %self.path.display(),
            loaded = report.expenses.len(),
            skipped = report.skipped.len(),
            "loaded expenses"
        );
        Ok(report)
    }

    /// Overwrite the file with the given expenses in the 4-column layout
    pub fn save(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        let bytes = encode_expenses(expenses)?;
        write_bytes_atomic(&self.path, &bytes)?;
        info!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(())
    }

    /// Delete the file if present
    pub fn remove(&self) -> ExpenseResult<bool> {
        remove_if_exists(&self.path)
    }
}

/// Decode expense rows from any reader
pub fn read_expenses<R: Read>(reader: R) -> LoadReport {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    let mut first = true;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                skip(&mut report, line, format!("unreadable row: {}", e));
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if std::mem::take(&mut first) && is_header(&record) {
            report.header = SchemaVersion::from_columns(record.len());
            continue;
        }

        match parse_record(&record) {
            Ok(expense) => report.expenses.push(expense),
            Err(reason) => skip(&mut report, line, reason),
        }
    }

    report
}

/// Encode expenses as CSV bytes, header first
pub fn encode_expenses(expenses: &[Expense]) -> ExpenseResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPENSE_HEADER)?;

    for expense in expenses {
        writer.write_record([
            expense.date.format(DATE_FORMAT).to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
            expense.category.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExpenseError::Csv(format!("Failed to finish expense file: {}", e)))
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .map(|field| field.trim().eq_ignore_ascii_case(EXPENSE_HEADER[0]))
        .unwrap_or(false)
}

fn skip(report: &mut LoadReport, line: u64, reason: String) {
    warn!(line, reason = %reason, "skipping expense row");
    report.skipped.push(SkippedRow { line, reason });
}

fn parse_record(record: &StringRecord) -> Result<Expense, String> {
    let schema = SchemaVersion::from_columns(record.len())
        .ok_or_else(|| format!("expected 3 or 4 columns, found {}", record.len()))?;

    let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default();

    let date = NaiveDate::parse_from_str(field(0), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}'", field(0)))?;

    let description = field(1);
    if description.is_empty() {
        return Err("missing description".to_string());
    }

    let amount = Money::parse(field(2)).map_err(|e| format!("invalid amount: {}", e))?;

    let category = match schema {
        SchemaVersion::Legacy => "",
        SchemaVersion::Categorized => field(3),
    };

    Ok(Expense::new(date, description, amount, category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNCATEGORIZED;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new(date(2025, 1, 5), "Coffee, large", Money::from_cents(450), "Food"),
            Expense::new(date(2025, 1, 3), "Refund", Money::from_cents(-1000), "Shopping"),
            Expense::new(date(2025, 2, 1), "Rent \"Feb\"", Money::from_cents(120000), ""),
            Expense::new(date(2025, 2, 2), "Stamp", Money::parse("0.004").unwrap(), "Post"),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let file = ExpenseFile::new(temp_dir.path().join("expenses.csv"));

        let report = file.load().unwrap();
        assert!(report.expenses.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_save_and_reload_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let file = ExpenseFile::new(temp_dir.path().join("data").join("expenses.csv"));

        let expenses = sample();
        file.save(&expenses).unwrap();

        let report = file.load().unwrap();
        assert_eq!(report.expenses, expenses);
        assert_eq!(report.header, Some(SchemaVersion::Categorized));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_encoded_layout() {
        let expenses = vec![Expense::new(
            date(2025, 3, 1),
            "Lunch",
            Money::from_cents(1250),
            "Food",
        )];

        let text = String::from_utf8(encode_expenses(&expenses).unwrap()).unwrap();
        assert_eq!(
            text,
            "Date,Description,Amount,Category\n2025-03-01,Lunch,12.50,Food\n"
        );
    }

    #[test]
    fn test_legacy_three_column_rows() {
        let data = "Date,Description,Amount\n2024-12-01,Bus,2.5\n2024-12-02,Tea,1\n";
        let report = read_expenses(data.as_bytes());

        assert_eq!(report.header, Some(SchemaVersion::Legacy));
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.expenses[0].category, UNCATEGORIZED);
        assert_eq!(report.expenses[0].amount, Money::from_cents(250));
    }

    #[test]
    fn test_mixed_layouts_without_header() {
        let data = "2025-01-01,Bus,2.50\n2025-01-02,Lunch,10,Food\n";
        let report = read_expenses(data.as_bytes());

        assert_eq!(report.header, None);
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.expenses[0].category, UNCATEGORIZED);
        assert_eq!(report.expenses[1].category, "Food");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let data = "\
Date,Description,Amount,Category
2025-01-01,Good,5.00,Food
2025-01-02,Bad amount,abc,Food
2025-01-03,Too,many,columns,here
not-a-date,Bad date,1.00,Food
2025-01-04,,3.00,Food
2025-01-05,Also good,7,
";
        let report = read_expenses(data.as_bytes());

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.expenses[0].description, "Good");
        assert_eq!(report.expenses[1].description, "Also good");
        assert_eq!(report.expenses[1].category, UNCATEGORIZED);

        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(report.skipped[0].reason.contains("invalid amount"));
        assert!(report.skipped[1].reason.contains("found 5"));
    }

    #[test]
    fn test_amounts_keep_precision_and_range() {
        let data = "\
Date,Description,Amount,Category
2025-01-01,Stamp,1.004,Post
2025-01-02,Laptop,1e3,Work
2025-01-03,Yacht,90000000000000000,Fun
2025-01-04,Yacht again,90000000000000000,Fun
";
        let report = read_expenses(data.as_bytes());

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.expenses[0].amount.to_string(), "1.004");
        assert_eq!(report.expenses[1].amount, Money::from_cents(100_000));

        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![4, 5]);
        assert!(report.skipped[0].reason.contains("out of range"));

        let text = String::from_utf8(encode_expenses(&report.expenses).unwrap()).unwrap();
        assert!(text.contains("2025-01-01,Stamp,1.004,Post\n"));
        assert!(text.contains("2025-01-02,Laptop,1000.00,Work\n"));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let file = ExpenseFile::new(temp_dir.path().join("expenses.csv"));
        file.save(&sample()).unwrap();

        assert!(file.remove().unwrap());
        assert!(!file.exists());
    }
}
