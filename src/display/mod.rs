//! Display formatting for terminal output

pub mod category;
pub mod expense;
pub mod report;

pub use category::format_category_list;
pub use expense::{format_expense_line, format_expense_table, format_total};
pub use report::{format_category_summary, format_date_series, format_forecast, format_monthly_totals};
