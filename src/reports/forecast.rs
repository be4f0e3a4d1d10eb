//! Spending forecast
//!
//! Fits an ordinary least-squares line through the ledger and projects it
//! forward a fixed number of days or months. There is no seasonality and no
//! confidence interval.
//!
//! Daily granularity uses every expense as a point, with `x` counted in days
//! since the earliest expense. Monthly granularity uses one point per
//! calendar month from the first to the last observed month (empty months
//! count as zero), with `x` the month's position in that run.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregation::dense_monthly_totals;
use crate::error::ForecastError;
use crate::models::{Expense, Money};

/// Time step used for fitting and projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per expense, projected in days
    Daily,
    /// One point per calendar month, projected in months
    #[default]
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Self::Daily),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            other => Err(format!(
                "Unknown granularity '{}': expected 'daily' or 'monthly'",
                other
            )),
        }
    }
}

/// A fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(x, y)` points by ordinary least squares
    ///
    /// Fails with `InsufficientData` for fewer than two points and with
    /// `DegenerateInput` when every point has the same `x`.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self, ForecastError> {
        let count = points.len();
        if count < 2 {
            return Err(ForecastError::InsufficientData(count));
        }

        let first_x = points[0].0;
        if points.iter().all(|(x, _)| *x == first_x) {
            return Err(ForecastError::DegenerateInput(count));
        }

        let n = count as f64;
        let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
            (0.0, 0.0, 0.0, 0.0),
            |(sx, sy, sxy, sxx), (x, y)| (sx + x, sy + y, sxy + x * y, sxx + x * x),
        );

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return Err(ForecastError::DegenerateInput(count));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self { slope, intercept })
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// One projected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    /// Last expense date moved forward by the step in days or months
    pub date: NaiveDate,
    pub amount: Money,
}

/// Result of a forecast run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub granularity: Granularity,
    pub fit: LinearFit,
    /// Number of data points the line was fitted to
    pub observations: usize,
    /// Projected values, exactly `horizon` of them
    pub points: Vec<ForecastPoint>,
}

/// Project spending `horizon` steps past the last observation
pub fn forecast(
    expenses: &[Expense],
    horizon: usize,
    granularity: Granularity,
) -> Result<Forecast, ForecastError> {
    let forecast = match granularity {
        Granularity::Daily => forecast_daily(expenses, horizon)?,
        Granularity::Monthly => forecast_monthly(expenses, horizon)?,
    };

    debug!(
        granularity = %forecast.granularity,
        observations = forecast.observations,
        slope = forecast.fit.slope,
        intercept = forecast.fit.intercept,
        horizon,
        "fitted spending trend"
    );
    Ok(forecast)
}

fn forecast_daily(expenses: &[Expense], horizon: usize) -> Result<Forecast, ForecastError> {
    if expenses.len() < 2 {
        return Err(ForecastError::InsufficientData(expenses.len()));
    }

    let (Some(first_date), Some(last_date)) = (
        expenses.iter().map(|e| e.date).min(),
        expenses.iter().map(|e| e.date).max(),
    ) else {
        return Err(ForecastError::InsufficientData(expenses.len()));
    };

    let points: Vec<(f64, f64)> = expenses
        .iter()
        .map(|e| ((e.date - first_date).num_days() as f64, e.amount.to_f64()))
        .collect();
    let fit = LinearFit::fit(&points)?;

    let last_x = (last_date - first_date).num_days();
    let projected = (1..=horizon as u64)
        .map(|step| ForecastPoint {
            date: last_date
                .checked_add_days(Days::new(step))
                .unwrap_or(NaiveDate::MAX),
            amount: Money::from_f64_rounded(fit.predict((last_x + step as i64) as f64)),
        })
        .collect();

    Ok(Forecast {
        granularity: Granularity::Daily,
        fit,
        observations: points.len(),
        points: projected,
    })
}

fn forecast_monthly(expenses: &[Expense], horizon: usize) -> Result<Forecast, ForecastError> {
    let totals = dense_monthly_totals(expenses);
    if totals.len() < 2 {
        return Err(ForecastError::InsufficientData(totals.len()));
    }

    let points: Vec<(f64, f64)> = totals
        .iter()
        .enumerate()
        .map(|(idx, bucket)| (idx as f64, bucket.total.to_f64()))
        .collect();
    let fit = LinearFit::fit(&points)?;

    let last_x = (totals.len() - 1) as i64;
    let last_date = expenses
        .iter()
        .map(|e| e.date)
        .max()
        .ok_or(ForecastError::InsufficientData(0))?;
    let projected = (1..=u32::try_from(horizon).unwrap_or(u32::MAX))
        .map(|step| ForecastPoint {
            // Day of month clamps to the target month's length
            date: last_date
                .checked_add_months(Months::new(step))
                .unwrap_or(NaiveDate::MAX),
            amount: Money::from_f64_rounded(fit.predict((last_x + i64::from(step)) as f64)),
        })
        .collect();

    Ok(Forecast {
        granularity: Granularity::Monthly,
        fit,
        observations: points.len(),
        points: projected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(date: NaiveDate, cents: i64) -> Expense {
        Expense::new(date, "item", Money::from_cents(cents), "Food")
    }

    #[test]
    fn test_fit_two_points() {
        let fit = LinearFit::fit(&[(0.0, 10.0), (1.0, 20.0)]).unwrap();
        assert_eq!(fit.slope, 10.0);
        assert_eq!(fit.intercept, 10.0);
        assert_eq!(fit.predict(2.0), 30.0);
    }

    #[test]
    fn test_fit_noisy_points() {
        // y = 2x + 1 with symmetric noise
        let fit = LinearFit::fit(&[(0.0, 1.5), (1.0, 2.5), (2.0, 5.5), (3.0, 6.5)]).unwrap();
        assert!((fit.slope - 1.8).abs() < 1e-9);
        assert!((fit.intercept - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_fit_insufficient() {
        assert_eq!(
            LinearFit::fit(&[(0.0, 10.0)]),
            Err(ForecastError::InsufficientData(1))
        );
        assert_eq!(LinearFit::fit(&[]), Err(ForecastError::InsufficientData(0)));
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(
            LinearFit::fit(&[(0.0, 10.0), (0.0, 20.0)]),
            Err(ForecastError::DegenerateInput(2))
        );
    }

    #[test]
    fn test_daily_forecast() {
        let expenses = vec![
            expense(date(2025, 1, 1), 1000),
            expense(date(2025, 1, 2), 2000),
        ];

        let result = forecast(&expenses, 1, Granularity::Daily).unwrap();

        assert_eq!(result.fit.slope, 10.0);
        assert_eq!(result.fit.intercept, 10.0);
        assert_eq!(
            result.points,
            vec![ForecastPoint {
                date: date(2025, 1, 3),
                amount: Money::from_cents(3000),
            }]
        );
    }

    #[test]
    fn test_daily_forecast_unsorted_input() {
        let expenses = vec![
            expense(date(2025, 1, 3), 3000),
            expense(date(2025, 1, 1), 1000),
        ];

        let result = forecast(&expenses, 3, Granularity::Daily).unwrap();
        let dates: Vec<_> = result.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, [date(2025, 1, 4), date(2025, 1, 5), date(2025, 1, 6)]);
        assert_eq!(result.points[0].amount, Money::from_cents(4000));
    }

    #[test]
    fn test_daily_forecast_single_expense() {
        let expenses = vec![expense(date(2025, 1, 1), 1000)];
        assert_eq!(
            forecast(&expenses, 30, Granularity::Daily),
            Err(ForecastError::InsufficientData(1))
        );
    }

    #[test]
    fn test_daily_forecast_same_day() {
        let expenses = vec![
            expense(date(2025, 1, 1), 1000),
            expense(date(2025, 1, 1), 2500),
        ];
        assert_eq!(
            forecast(&expenses, 30, Granularity::Daily),
            Err(ForecastError::DegenerateInput(2))
        );
    }

    #[test]
    fn test_horizon_length() {
        let expenses = vec![
            expense(date(2025, 1, 1), 1000),
            expense(date(2025, 1, 9), 500),
        ];
        assert_eq!(
            forecast(&expenses, 30, Granularity::Daily).unwrap().points.len(),
            30
        );
        assert!(forecast(&expenses, 0, Granularity::Daily)
            .unwrap()
            .points
            .is_empty());
    }

    #[test]
    fn test_monthly_forecast() {
        // January 100, February 200 (two expenses), March 300
        let expenses = vec![
            expense(date(2025, 1, 15), 10000),
            expense(date(2025, 2, 3), 5000),
            expense(date(2025, 2, 20), 15000),
            expense(date(2025, 3, 31), 30000),
        ];

        let result = forecast(&expenses, 12, Granularity::Monthly).unwrap();

        assert_eq!(result.observations, 3);
        assert!((result.fit.slope - 100.0).abs() < 1e-9);
        assert_eq!(result.points.len(), 12);
        // Projections step from the last expense date, clamped to month end
        assert_eq!(result.points[0].date, date(2025, 4, 30));
        assert_eq!(result.points[0].amount, Money::from_cents(40000));
        assert_eq!(result.points[1].date, date(2025, 5, 31));
        assert_eq!(result.points[11].date, date(2026, 3, 31));
    }

    #[test]
    fn test_monthly_forecast_counts_empty_months() {
        let expenses = vec![
            expense(date(2025, 1, 1), 10000),
            expense(date(2025, 3, 1), 10000),
        ];

        let result = forecast(&expenses, 1, Granularity::Monthly).unwrap();
        assert_eq!(result.observations, 3);
        assert_eq!(result.fit.slope, 0.0);
        assert_eq!(result.points[0].date, date(2025, 4, 1));
    }

    #[test]
    fn test_monthly_forecast_keeps_day_of_last_expense() {
        let expenses = vec![
            expense(date(2024, 12, 5), 1000),
            expense(date(2025, 1, 17), 2000),
        ];

        let result = forecast(&expenses, 2, Granularity::Monthly).unwrap();
        let dates: Vec<_> = result.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, [date(2025, 2, 17), date(2025, 3, 17)]);
    }

    #[test]
    fn test_monthly_forecast_single_month() {
        let expenses = vec![
            expense(date(2025, 1, 1), 1000),
            expense(date(2025, 1, 20), 2000),
        ];
        assert_eq!(
            forecast(&expenses, 12, Granularity::Monthly),
            Err(ForecastError::InsufficientData(1))
        );
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("Monthly".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert!("weekly".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Daily.to_string(), "daily");
    }
}
