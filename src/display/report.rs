//! Report display formatting
//!
//! Text renderings of the aggregation and forecast reports.

use tabled::{settings::Style, Table, Tabled};

use crate::models::Money;
use crate::reports::{CategoryTotal, DatedAmount, Forecast, MonthlyTotal};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct DateRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Running")]
    running: String,
}

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format totals by category with each category's share
pub fn format_category_summary(totals: &[CategoryTotal], symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows: Vec<CategoryRow> = totals
        .iter()
        .map(|t| CategoryRow {
            category: t.category.clone(),
            count: t.count,
            total: t.total.format_with_symbol(symbol),
            share: format!("{:.1}%", t.percentage),
        })
        .collect();

    let grand: Money = totals.iter().map(|t| t.total).sum();
    format!(
        "Spending by Category\n{}\nTotal: {}\n",
        Table::new(rows).with(Style::rounded()),
        grand.format_with_symbol(symbol)
    )
}

/// Format the chronological series with a running total
pub fn format_date_series(series: &[DatedAmount], symbol: &str, date_format: &str) -> String {
    if series.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut running = Money::zero();
    let rows: Vec<DateRow> = series
        .iter()
        .map(|point| {
            running += point.amount;
            DateRow {
                date: point.date.format(date_format).to_string(),
                category: point.category.clone(),
                amount: point.amount.format_with_symbol(symbol),
                running: running.format_with_symbol(symbol),
            }
        })
        .collect();

    format!(
        "Spending by Date\n{}\n",
        Table::new(rows).with(Style::rounded())
    )
}

/// Format calendar-month totals
pub fn format_monthly_totals(totals: &[MonthlyTotal], symbol: &str) -> String {
    if totals.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let rows: Vec<AmountRow> = totals
        .iter()
        .map(|t| AmountRow {
            period: t.month.to_string(),
            amount: t.total.format_with_symbol(symbol),
        })
        .collect();

    format!(
        "Spending by Month\n{}\n",
        Table::new(rows).with(Style::rounded())
    )
}

/// Format projected amounts along with the fitted trend
pub fn format_forecast(forecast: &Forecast, symbol: &str, date_format: &str) -> String {
    let mut output = format!(
        "Forecast ({}, {} steps from {} observations)\n",
        forecast.granularity,
        forecast.points.len(),
        forecast.observations
    );
    output.push_str(&format!(
        "Trend: {:.2} per step, intercept {:.2}\n",
        forecast.fit.slope, forecast.fit.intercept
    ));

    if forecast.points.is_empty() {
        return output;
    }

    let rows: Vec<AmountRow> = forecast
        .points
        .iter()
        .map(|p| AmountRow {
            period: p.date.format(date_format).to_string(),
            amount: p.amount.format_with_symbol(symbol),
        })
        .collect();

    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output
}
