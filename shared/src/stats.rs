//! Weight statistics aggregation
//!
//! Combines the profile, the trend window matcher and the forecast
//! projector into a single `WeightStatsSnapshot` for one user.

use crate::errors::MetricsResult;
use crate::forecast::{project_completion, DEFAULT_FORECAST_WINDOW_DAYS};
use crate::health_metrics::{calculate_bmi_with_category, classify_bmi};
use crate::models::{BodyProfile, TrendPoint, WeightSample, WeightStatsSnapshot};
use crate::trend::{find_nearest_sample, sort_chronologically, TrendWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Windows and tolerances used when building statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsPolicy {
    pub weekly_window: TrendWindow,
    pub monthly_window: TrendWindow,
    pub forecast_window_days: i64,
}

impl Default for AnalyticsPolicy {
    fn default() -> Self {
        Self {
            weekly_window: TrendWindow::WEEKLY,
            monthly_window: TrendWindow::MONTHLY,
            forecast_window_days: DEFAULT_FORECAST_WINDOW_DAYS,
        }
    }
}

/// Build the statistics snapshot for a user's full sample history
///
/// Inputs are never mutated; calling twice with the same arguments yields
/// equal snapshots.
pub fn build_weight_stats(
    samples: &[WeightSample],
    profile: &BodyProfile,
    now: DateTime<Utc>,
    policy: &AnalyticsPolicy,
) -> MetricsResult<WeightStatsSnapshot> {
    let sorted = sort_chronologically(samples);

    let (earliest, latest) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(profile_only_snapshot(profile)),
    };

    let current_weight = latest.weight_kg;
    let starting_weight = profile.starting_weight_kg.unwrap_or(earliest.weight_kg);
    let target_weight = profile.target_weight_kg;

    let weekly_change = find_nearest_sample(samples, now, policy.weekly_window)
        .map(|past| current_weight - past.weight_kg);
    let monthly_change = find_nearest_sample(samples, now, policy.monthly_window)
        .map(|past| current_weight - past.weight_kg);

    // A cached BMI wins; a missing cached category is classified from it
    let (bmi, bmi_category) = match profile.bmi {
        Some(bmi) => (bmi, profile.bmi_category.unwrap_or_else(|| classify_bmi(bmi))),
        None => calculate_bmi_with_category(current_weight, profile.height_cm)?,
    };
    let (bmi, bmi_category) = (Some(bmi), Some(bmi_category));

    let estimated_completion_date = if current_weight == target_weight {
        None
    } else {
        project_completion(
            samples,
            target_weight,
            current_weight,
            now,
            policy.forecast_window_days,
        )
        .map(|f| f.completion_date)
    };

    Ok(WeightStatsSnapshot {
        current_weight,
        starting_weight,
        target_weight,
        total_change: current_weight - starting_weight,
        weekly_change,
        monthly_change,
        bmi,
        bmi_category,
        trend: sorted.into_iter().map(TrendPoint::from).collect(),
        target_date: profile.target_date,
        estimated_completion_date,
    })
}

/// Snapshot for a user without any logged samples
fn profile_only_snapshot(profile: &BodyProfile) -> WeightStatsSnapshot {
    WeightStatsSnapshot {
        current_weight: profile.current_weight_kg,
        starting_weight: profile.starting_weight_kg.unwrap_or(profile.current_weight_kg),
        target_weight: profile.target_weight_kg,
        total_change: 0.0,
        weekly_change: None,
        monthly_change: None,
        bmi: profile.bmi,
        bmi_category: profile.bmi_category,
        trend: Vec::new(),
        target_date: profile.target_date,
        estimated_completion_date: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::{ActivityLevel, BmiCategory, Gender};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap()
    }

    fn days_ago(days: i64, weight: f64) -> WeightSample {
        WeightSample::new(now() - Duration::days(days), weight)
    }

    fn profile() -> BodyProfile {
        BodyProfile {
            gender: Gender::Male,
            age_years: 40,
            height_cm: 180.0,
            activity_level: ActivityLevel::LightlyActive,
            current_weight_kg: 80.0,
            starting_weight_kg: Some(85.0),
            target_weight_kg: 75.0,
            target_date: None,
            bmi: None,
            bmi_category: None,
        }
    }

    #[test]
    fn test_no_logs_uses_profile() {
        let stats = build_weight_stats(&[], &profile(), now(), &AnalyticsPolicy::default()).unwrap();

        assert_eq!(stats.current_weight, 80.0);
        assert_eq!(stats.starting_weight, 85.0);
        assert_eq!(stats.target_weight, 75.0);
        assert_eq!(stats.total_change, 0.0);
        assert_eq!(stats.weekly_change, None);
        assert_eq!(stats.monthly_change, None);
        assert!(stats.trend.is_empty());
        assert_eq!(stats.estimated_completion_date, None);
        assert_eq!(stats.bmi, None);
    }

    #[test]
    fn test_full_history() {
        let samples = vec![
            days_ago(0, 79.0).with_note("morning"),
            days_ago(30, 84.0),
            days_ago(8, 80.5),
        ];
        let stats = build_weight_stats(&samples, &profile(), now(), &AnalyticsPolicy::default()).unwrap();

        assert_eq!(stats.current_weight, 79.0);
        assert_eq!(stats.starting_weight, 85.0);
        assert_eq!(stats.total_change, -6.0);
        assert!((stats.weekly_change.unwrap() + 1.5).abs() < 1e-9);
        assert!((stats.monthly_change.unwrap() + 5.0).abs() < 1e-9);

        let weights: Vec<f64> = stats.trend.iter().map(|p| p.weight).collect();
        assert_eq!(weights, vec![84.0, 80.5, 79.0]);
        assert_eq!(stats.trend[2].note.as_deref(), Some("morning"));

        // 79 / 1.8^2
        assert!((stats.bmi.unwrap() - 24.38).abs() < 0.01);
        assert_eq!(stats.bmi_category, Some(BmiCategory::Normal));

        // -5 kg over 30 days, 4 kg to go => 24 days
        assert_eq!(stats.estimated_completion_date, Some(now() + Duration::days(24)));
    }

    #[test]
    fn test_starting_weight_falls_back_to_earliest_sample() {
        let mut p = profile();
        p.starting_weight_kg = None;
        let samples = vec![days_ago(3, 81.0), days_ago(10, 83.0)];
        let stats = build_weight_stats(&samples, &p, now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(stats.starting_weight, 83.0);
        assert_eq!(stats.total_change, -2.0);
    }

    #[test]
    fn test_cached_bmi_is_preferred() {
        let mut p = profile();
        p.bmi = Some(26.1);
        p.bmi_category = Some(BmiCategory::Overweight);
        let samples = vec![days_ago(0, 79.0)];
        let stats = build_weight_stats(&samples, &p, now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(stats.bmi, Some(26.1));
        assert_eq!(stats.bmi_category, Some(BmiCategory::Overweight));
    }

    #[test]
    fn test_cached_bmi_without_category_is_classified_not_recomputed() {
        let mut p = profile();
        p.bmi = Some(31.0);
        p.bmi_category = None;
        p.height_cm = 0.0;
        let samples = vec![days_ago(0, 79.0)];
        let stats = build_weight_stats(&samples, &p, now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(stats.bmi, Some(31.0));
        assert_eq!(stats.bmi_category, Some(BmiCategory::Obese));
    }

    #[test]
    fn test_missing_bmi_with_bad_height_is_invalid_input() {
        let mut p = profile();
        p.height_cm = 0.0;
        let samples = vec![days_ago(0, 79.0)];
        assert!(build_weight_stats(&samples, &p, now(), &AnalyticsPolicy::default()).is_err());
    }

    #[test]
    fn test_at_target_has_no_forecast() {
        let samples = vec![days_ago(20, 78.0), days_ago(0, 75.0)];
        let stats = build_weight_stats(&samples, &profile(), now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(stats.current_weight, 75.0);
        assert_eq!(stats.estimated_completion_date, None);
    }

    #[test]
    fn test_near_flat_history_has_no_forecast() {
        let samples = vec![days_ago(1, 80.0000001), days_ago(0, 80.0)];
        let mut p = profile();
        p.target_weight_kg = 70.0;
        let stats = build_weight_stats(&samples, &p, now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(stats.current_weight, 80.0);
        assert_eq!(stats.estimated_completion_date, None);
    }

    #[test]
    fn test_custom_policy_widens_weekly_tolerance() {
        let samples = vec![days_ago(0, 79.0), days_ago(13, 81.0)];
        let default = build_weight_stats(&samples, &profile(), now(), &AnalyticsPolicy::default()).unwrap();
        assert_eq!(default.weekly_change, None);

        let policy = AnalyticsPolicy {
            weekly_window: TrendWindow {
                lookback_days: 7,
                tolerance_days: 6,
            },
            ..AnalyticsPolicy::default()
        };
        let widened = build_weight_stats(&samples, &profile(), now(), &policy).unwrap();
        assert!((widened.weekly_change.unwrap() + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent_serialization() {
        let samples = vec![days_ago(0, 79.0), days_ago(6, 80.0), days_ago(29, 83.0)];
        let p = profile();
        let policy = AnalyticsPolicy::default();

        let first = build_weight_stats(&samples, &p, now(), &policy).unwrap();
        let second = build_weight_stats(&samples, &p, now(), &policy).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
