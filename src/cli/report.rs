//! Report CLI commands
//!
//! `summary` and `forecast`.

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::report::{
    format_category_summary, format_date_series, format_forecast, format_monthly_totals,
};
use crate::error::ExpenseResult;
use crate::reports::{category_summary, Granularity};
use crate::services::Session;

/// Summary subcommands
#[derive(Subcommand, Debug)]
pub enum SummaryCommands {
    /// Totals per category, largest first
    Category,
    /// Every expense in date order with a running total
    Date,
    /// Totals per calendar month
    Month,
}

/// Arguments for `forecast`
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// daily or monthly (defaults to the configured granularity)
    #[arg(short, long)]
    pub granularity: Option<Granularity>,
    /// Number of future days or months to project
    #[arg(long)]
    pub horizon: Option<usize>,
}

/// Handle a summary command
pub fn handle_summary_command(
    session: &Session,
    settings: &Settings,
    cmd: SummaryCommands,
) -> ExpenseResult<()> {
    let symbol = &settings.currency_symbol;

    let output = match cmd {
        SummaryCommands::Category => {
            format_category_summary(&category_summary(session.list_expenses()), symbol)
        }
        SummaryCommands::Date => {
            format_date_series(&session.aggregate_by_date(), symbol, &settings.date_format)
        }
        SummaryCommands::Month => format_monthly_totals(&session.aggregate_by_month(), symbol),
    };

    print!("{}", output);
    Ok(())
}

/// Handle the forecast command
pub fn handle_forecast(
    session: &Session,
    settings: &Settings,
    args: ForecastArgs,
) -> ExpenseResult<()> {
    let granularity = args.granularity.unwrap_or(settings.default_granularity);
    let horizon = args
        .horizon
        .unwrap_or_else(|| settings.horizon_for(granularity));

    let forecast = session.forecast(horizon, granularity)?;
    print!(
        "{}",
        format_forecast(&forecast, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}
