//! Data models for the SlimSense analytics engine

use crate::health_metrics::{ActivityLevel, BmiCategory, Gender};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single weight measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WeightSample {
    pub fn new(timestamp: DateTime<Utc>, weight_kg: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            weight_kg,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Body metrics a user's calculations are anchored on
///
/// `starting_weight_kg` is set once (account creation or first sample)
/// and only changed by an explicit update. `bmi`/`bmi_category` hold the
/// last cached values, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub gender: Gender,
    pub age_years: i32,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub current_weight_kg: f64,
    #[serde(default)]
    pub starting_weight_kg: Option<f64>,
    pub target_weight_kg: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub bmi_category: Option<BmiCategory>,
}

/// Goal direction derived from current and target weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDirection {
    Lose,
    Gain,
    Maintain,
}

impl WeightDirection {
    pub fn between(current_kg: f64, target_kg: f64) -> Self {
        if current_kg > target_kg {
            WeightDirection::Lose
        } else if current_kg < target_kg {
            WeightDirection::Gain
        } else {
            WeightDirection::Maintain
        }
    }
}

impl BodyProfile {
    pub fn direction(&self) -> WeightDirection {
        WeightDirection::between(self.current_weight_kg, self.target_weight_kg)
    }
}

/// Daily nutrition targets derived from a body profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoal {
    pub calorie_goal: i32,
    pub protein_goal_g: i32,
    pub carbs_goal_g: i32,
    pub fat_goal_g: i32,
    pub fiber_goal_g: i32,
    pub water_goal_ml: i32,
}

/// One point of the weight trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&WeightSample> for TrendPoint {
    fn from(sample: &WeightSample) -> Self {
        Self {
            date: sample.timestamp.date_naive(),
            weight: sample.weight_kg,
            note: sample.note.clone(),
        }
    }
}

/// Consolidated weight statistics for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStatsSnapshot {
    pub current_weight: f64,
    pub starting_weight: f64,
    pub target_weight: f64,
    pub total_change: f64,
    pub weekly_change: Option<f64>,
    pub monthly_change: Option<f64>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub trend: Vec<TrendPoint>,
    pub target_date: Option<NaiveDate>,
    pub estimated_completion_date: Option<DateTime<Utc>>,
}
