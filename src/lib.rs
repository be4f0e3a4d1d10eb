//! Expense Tracker - personal expense ledger with summaries and forecasts
//!
//! Records dated expenses tagged with categories, aggregates them by
//! category, date and month, and projects future spending with a
//! least-squares trend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Error types
//! - `models`: Value types (`Money`, `Month`, `Expense`)
//! - `services`: Category registry, expense ledger and the session surface
//! - `reports`: Aggregation and forecasting
//! - `storage`: CSV persistence with atomic writes
//! - `audit`: Audit log of mutations
//! - `export`: Full JSON/YAML snapshots
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::paths::ExpensePaths;
//! use expense_tracker::reports::Granularity;
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::new(ExpensePaths::new()?)?;
//! let (mut session, _report) = storage.load_session()?;
//! session.add_expense(today, "Lunch", "12.50", "")?;
//! storage.save_session(&session)?;
//! let forecast = session.forecast(12, Granularity::Monthly)?;
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult, ForecastError, ValidationError};

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or
/// informational events as well when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let default = if verbose {
            "expense_tracker=info"
        } else {
            "expense_tracker=warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
