//! Next-month projection from a least-squares trend over monthly net values.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use tracker_domain::{Calendar, MonthBucket, Profile, Transaction};

use crate::{aggregation::aggregate_months, time::Clock};

pub const DEFAULT_FORECAST_MONTHS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastResult {
    pub predicted_income: f64,
    pub predicted_expense: f64,
    pub predicted_net: f64,
}

/// Slope and intercept of the ordinary least squares fit of `ys` against their indices.
///
/// A single point (or none) has no spread in x, so the slope is 0.
fn fit_trend(ys: &[f64]) -> (f64, f64) {
    if ys.is_empty() {
        return (0.0, 0.0);
    }
    let n = ys.len() as f64;
    let mean_x = ys.iter().enumerate().map(|(i, _)| i as f64).sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    let slope = if den == 0.0 { 0.0 } else { num / den };
    (slope, mean_y - slope * mean_x)
}

fn project_net(buckets: &[MonthBucket]) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    let nets: Vec<f64> = buckets.iter().map(MonthBucket::net).collect();
    let (slope, intercept) = fit_trend(&nets);
    intercept + slope * nets.len() as f64
}

/// Projects the net value one month past the trailing window ending at `as_of`.
pub fn predict_next_net(
    transactions: &[Transaction],
    trailing_months: usize,
    as_of: DateTime<Utc>,
    calendar: Calendar,
) -> f64 {
    project_net(&aggregate_months(transactions, trailing_months, as_of, calendar))
}

/// Splits the projected net into income and expense around the window averages.
///
/// This is a heuristic, not a per-series regression: income is the average
/// income shifted by half the projected net, and expense is whatever keeps
/// `income - expense == net`. Both are floored at zero.
pub fn predict_next_split(
    transactions: &[Transaction],
    trailing_months: usize,
    as_of: DateTime<Utc>,
    calendar: Calendar,
) -> ForecastResult {
    let buckets = aggregate_months(transactions, trailing_months, as_of, calendar);
    let net = project_net(&buckets);
    let denominator = buckets.len().max(1) as f64;
    let avg_income = buckets.iter().map(|b| b.income).sum::<f64>() / denominator;
    let avg_expense = buckets.iter().map(|b| b.expense).sum::<f64>() / denominator;

    let predicted_income = (avg_income + net / 2.0).max(0.0);
    let predicted_expense = (predicted_income - net).max(0.0);
    debug!(
        trailing_months,
        net, avg_income, avg_expense, "computed next-month forecast"
    );
    ForecastResult {
        predicted_income,
        predicted_expense,
        predicted_net: net,
    }
}

pub struct ForecastService;

impl ForecastService {
    /// Forecast for the month after the clock's current month.
    pub fn next_month(profile: &Profile, clock: &dyn Clock, trailing_months: usize) -> ForecastResult {
        predict_next_split(
            profile.transactions(),
            trailing_months,
            clock.now(),
            clock.calendar(),
        )
    }

    pub fn next_net(profile: &Profile, clock: &dyn Clock, trailing_months: usize) -> f64 {
        predict_next_net(
            profile.transactions(),
            trailing_months,
            clock.now(),
            clock.calendar(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tracker_domain::{MonthKey, TransactionKind};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()
    }

    /// One income entry per month so that month `i` of the window nets `nets[i]`.
    fn series(nets: &[f64]) -> Vec<Transaction> {
        let keys = MonthKey::window_ending(Calendar::Utc.month_of(&as_of()), nets.len());
        keys.iter()
            .zip(nets)
            .filter(|(_, net)| **net != 0.0)
            .map(|(key, net)| {
                let ts = key.date_on(10).unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
                let kind = if *net > 0.0 {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                };
                Transaction::new("entry", net.abs(), kind, "General", ts)
            })
            .collect()
    }

    #[test]
    fn linear_series_projects_next_step() {
        let txns = series(&[100.0, 200.0, 300.0, 400.0, 500.0, 600.0]);
        assert_eq!(predict_next_net(&txns, 6, as_of(), Calendar::Utc), 700.0);
    }

    #[test]
    fn constant_series_projects_same_value() {
        let txns = series(&[50.0; 6]);
        assert_eq!(predict_next_net(&txns, 6, as_of(), Calendar::Utc), 50.0);
    }

    #[test]
    fn zero_months_projects_zero() {
        let txns = series(&[50.0; 3]);
        assert_eq!(predict_next_net(&txns, 0, as_of(), Calendar::Utc), 0.0);
        let split = predict_next_split(&txns, 0, as_of(), Calendar::Utc);
        assert_eq!(split.predicted_net, 0.0);
        assert_eq!(split.predicted_income, 0.0);
        assert_eq!(split.predicted_expense, 0.0);
    }

    #[test]
    fn single_month_uses_flat_trend() {
        let txns = series(&[120.0]);
        assert_eq!(predict_next_net(&txns, 1, as_of(), Calendar::Utc), 120.0);
    }

    #[test]
    fn declining_series_extrapolates_below_zero() {
        let txns = series(&[300.0, 200.0, 100.0]);
        assert_eq!(predict_next_net(&txns, 3, as_of(), Calendar::Utc), 0.0);
        let txns = series(&[200.0, 100.0, 0.0]);
        assert_eq!(predict_next_net(&txns, 3, as_of(), Calendar::Utc), -100.0);
    }

    #[test]
    fn split_matches_heuristic() {
        let txns = series(&[100.0, 200.0, 300.0, 400.0, 500.0, 600.0]);
        let result = predict_next_split(&txns, 6, as_of(), Calendar::Utc);
        assert_eq!(result.predicted_net, 700.0);
        // average income 350 plus half of the projected 700
        assert_eq!(result.predicted_income, 700.0);
        assert_eq!(result.predicted_expense, 0.0);
    }

    #[test]
    fn split_is_never_negative() {
        let all_expense = series(&[-100.0, -400.0, -900.0, -1600.0]);
        let result = predict_next_split(&all_expense, 4, as_of(), Calendar::Utc);
        assert!(result.predicted_net < 0.0);
        assert!(result.predicted_income >= 0.0);
        assert!(result.predicted_expense >= 0.0);

        let all_income = series(&[900.0, 400.0, 100.0, 0.0]);
        let result = predict_next_split(&all_income, 4, as_of(), Calendar::Utc);
        assert!(result.predicted_income >= 0.0);
        assert!(result.predicted_expense >= 0.0);
    }

    #[test]
    fn fit_trend_handles_degenerate_inputs() {
        assert_eq!(fit_trend(&[]), (0.0, 0.0));
        assert_eq!(fit_trend(&[42.0]), (0.0, 42.0));
        assert_eq!(fit_trend(&[1.0, 3.0]), (2.0, 1.0));
    }
}
