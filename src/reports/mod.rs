//! Reports over a ledger snapshot
//!
//! - `aggregation`: totals by category, by date and by month
//! - `forecast`: least-squares spending projection

pub mod aggregation;
pub mod forecast;

pub use aggregation::{
    category_summary, dense_monthly_totals, monthly_totals, series_by_date, total_by_category,
    CategoryTotal, DatedAmount, MonthlyTotal,
};
pub use forecast::{forecast, Forecast, ForecastPoint, Granularity, LinearFit};
