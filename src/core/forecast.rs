//! Naive linear projection of eventual trip spend.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::core::money::round2;
use crate::domain::expense::Expense;
use crate::domain::snapshot::Snapshot;

/// Projection steps past the observed series when a trip has no dates.
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Convenience wrapper over [`predict_total_for_group`] using wall-clock
/// "today" as the reference date.
pub fn predict_total_for_group_today(data: &Snapshot, group_id: Uuid, lookahead: usize) -> f64 {
    predict_total_for_group(data, group_id, Utc::now().date_naive(), lookahead)
}

/// Projects the eventual trip total from spend observed up to `reference`.
///
/// Fits an ordinary least-squares line to the cumulative daily spend series
/// and extrapolates it to the end of the trip (dated groups) or `lookahead`
/// days past the series (undated groups). The result never drops below the
/// spend already observed, and degenerate inputs fall back to that observed
/// total; given identical inputs the projection is fully deterministic.
pub fn predict_total_for_group(
    data: &Snapshot,
    group_id: Uuid,
    reference: NaiveDate,
    lookahead: usize,
) -> f64 {
    let mut expenses: Vec<&Expense> = data.expenses_for_group(group_id).collect();
    if expenses.is_empty() {
        return 0.0;
    }
    expenses.sort_by_key(|expense| expense.date);
    let current_total: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for expense in &expenses {
        *daily.entry(expense.date.date_naive()).or_insert(0.0) += expense.amount;
    }

    let window = data.group_by_id(group_id).and_then(|group| group.trip_window());

    // Dated trips get one sample per calendar day, zero-filled, up to the
    // earlier of the trip end and the reference date. Undated trips use only
    // the days that saw spending.
    let daily_series: Vec<f64> = match &window {
        Some(window) => window
            .days_until(reference)
            .map(|day| daily.get(&day).copied().unwrap_or(0.0))
            .collect(),
        None => daily.values().copied().collect(),
    };

    let mut cumulative = Vec::with_capacity(daily_series.len());
    let mut running = 0.0;
    for value in &daily_series {
        running += value;
        cumulative.push(running);
    }

    let n = cumulative.len();
    if n < 2 {
        return match &window {
            // One observation but known trip length: scale proportionally.
            Some(window) => {
                let scaled = (current_total / n.max(1) as f64) * window.len_days() as f64;
                tracing::debug!(group = %group_id, days = n, "forecast via proportional scaling");
                current_total.max(scaled)
            }
            None => current_total,
        };
    }

    let (slope, intercept) = linear_regression(&cumulative);
    let x_target = match &window {
        Some(window) => window.len_days() as f64,
        None => (n + lookahead) as f64,
    };
    let predicted = intercept + slope * x_target;
    let safe = if predicted.is_finite() {
        predicted.max(current_total)
    } else {
        current_total
    };
    round2(safe)
}

/// Closed-form OLS fit of `ys` against `x = 1..n`.
fn linear_regression(ys: &[f64]) -> (f64, f64) {
    let n = ys.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (index, y) in ys.iter().enumerate() {
        let x = (index + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let mut denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        denominator = 1.0;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}
