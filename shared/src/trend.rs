//! Trend window matching
//!
//! Finds the sample closest to a lookback instant ("7 days ago", "30 days
//! ago") so weekly and monthly change can be computed from irregular logs.

use crate::models::WeightSample;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Longest lookback, tolerance or forecast window a policy may configure
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// A lookback instant and how far from it a sample may lie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendWindow {
    pub lookback_days: i64,
    pub tolerance_days: i64,
}

impl TrendWindow {
    pub const WEEKLY: TrendWindow = TrendWindow {
        lookback_days: 7,
        tolerance_days: 4,
    };

    pub const MONTHLY: TrendWindow = TrendWindow {
        lookback_days: 30,
        tolerance_days: 7,
    };

    pub fn lookback(&self) -> Duration {
        Duration::days(self.lookback_days)
    }

    pub fn tolerance(&self) -> Duration {
        Duration::days(self.tolerance_days)
    }

    /// The instant this window is centred on
    pub fn reference(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.lookback()
    }
}

/// Samples in ascending timestamp order. The sort is stable, so samples
/// sharing a timestamp keep their input order.
pub fn sort_chronologically(samples: &[WeightSample]) -> Vec<&WeightSample> {
    let mut sorted: Vec<&WeightSample> = samples.iter().collect();
    sorted.sort_by_key(|s| s.timestamp);
    sorted
}

/// Find the sample nearest to `now - lookback`
///
/// Returns `None` for an empty series or when the nearest sample lies
/// further than the tolerance from the reference instant. On an exact tie
/// the earliest sample in chronological order wins.
pub fn find_nearest_sample<'a>(
    samples: &'a [WeightSample],
    now: DateTime<Utc>,
    window: TrendWindow,
) -> Option<&'a WeightSample> {
    let reference = window.reference(now);
    let mut best: Option<(&WeightSample, i64)> = None;

    for sample in sort_chronologically(samples) {
        let diff = (sample.timestamp - reference).num_milliseconds().abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((sample, diff)),
        }
    }

    best.filter(|(_, diff)| *diff <= window.tolerance().num_milliseconds())
        .map(|(sample, _)| sample)
}
