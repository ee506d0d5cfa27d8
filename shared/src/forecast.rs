//! Target-weight forecasting
//!
//! Extrapolates the average daily change over the recent window to a
//! completion date. Only forecasts when the trend moves toward the target.

use crate::models::{WeightDirection, WeightSample};
use crate::trend::sort_chronologically;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Days of history the forecast looks back over
pub const DEFAULT_FORECAST_WINDOW_DAYS: i64 = 30;

/// A projected completion of the weight goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Average change in kg per day over the window (negative = losing)
    pub average_daily_change: f64,
    pub days_to_target: i64,
    pub completion_date: DateTime<Utc>,
}

/// Project when `target_weight_kg` will be reached
///
/// Returns `None` when fewer than two samples fall in the window, when
/// they span less than a whole day, when the rate of change is zero, when
/// the user is already at target, or when the trend points away from it.
/// A rate so slow that the date falls outside the representable range is
/// also not a forecast.
pub fn project_completion(
    samples: &[WeightSample],
    target_weight_kg: f64,
    current_weight_kg: f64,
    now: DateTime<Utc>,
    window_days: i64,
) -> Option<Forecast> {
    let cutoff = Duration::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent: Vec<&WeightSample> = sort_chronologically(samples)
        .into_iter()
        .filter(|s| s.timestamp >= cutoff)
        .collect();

    let (first, last) = match recent.as_slice() {
        [first, .., last] => (*first, *last),
        _ => return None,
    };

    let days_between = (last.timestamp - first.timestamp).num_days();
    if days_between == 0 {
        return None;
    }

    let average_daily_change = (last.weight_kg - first.weight_kg) / days_between as f64;
    if average_daily_change == 0.0 {
        return None;
    }

    let on_trend = match WeightDirection::between(current_weight_kg, target_weight_kg) {
        WeightDirection::Lose => average_daily_change < 0.0,
        WeightDirection::Gain => average_daily_change > 0.0,
        WeightDirection::Maintain => false,
    };
    if !on_trend {
        return None;
    }

    let days_to_target = ((target_weight_kg - current_weight_kg) / average_daily_change).round() as i64;
    let completion_date = Duration::try_days(days_to_target).and_then(|d| now.checked_add_signed(d))?;

    Some(Forecast {
        average_daily_change,
        days_to_target,
        completion_date,
    })
}
