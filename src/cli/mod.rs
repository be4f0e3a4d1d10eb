//! CLI command handlers
//!
//! Bridges the clap argument parsing with the session and storage layers.
//! Mutating handlers save the session and record an audit entry before
//! printing their confirmation.

pub mod category;
pub mod data;
pub mod expense;
pub mod export;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use data::{handle_history, handle_reset};
pub use expense::{handle_add, handle_list, handle_remove, handle_total, AddArgs, RemoveArgs};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use report::{handle_forecast, handle_summary_command, ForecastArgs, SummaryCommands};
