//! Error types for the expense tracker
//!
//! Validation and forecast failures are modelled as their own enums so callers
//! can match on the exact kind and report it to the user. Everything else
//! (file access, CSV and JSON encoding) is folded into [`ExpenseError`].

use thiserror::Error;

/// Rejected input to a ledger or registry operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The amount text is not a finite decimal number in the accepted range
    #[error("Invalid amount '{0}': must be a number")]
    InvalidAmount(String),

    /// The index does not point at an existing expense
    #[error("No expense selected at position {index} (ledger has {len})")]
    SelectionRequired { index: usize, len: usize },

    /// Category label was empty or is already registered
    #[error("Category is either empty or already exists: '{0}'")]
    DuplicateOrEmpty(String),

    /// Category label is not a removable registered label
    ///
    /// Only category removal reports this; adding an expense with an
    /// unregistered category records it as uncategorized instead.
    #[error("Category not found: {0}")]
    NotFound(String),
}

/// Reasons a forecast could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer than two data points were available
    #[error("Not enough data to make predictions: need at least 2 points, have {0}")]
    InsufficientData(usize),

    /// Every data point shares the same x value
    #[error("Cannot fit a trend: all {0} data points fall on the same day or month")]
    DegenerateInput(usize),
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Forecasting errors
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Persistence gateway errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a forecast error
    pub fn is_forecast(&self) -> bool {
        matches!(self, Self::Forecast(_))
    }

    /// Check if this error came from the persistence side
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Csv(_) | Self::Json(_) | Self::Storage(_)
        )
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
