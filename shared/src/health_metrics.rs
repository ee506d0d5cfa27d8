//! Anthropometric calculations
//!
//! BMI, BMI category, BMR (Mifflin-St Jeor) and TDEE derivation from a
//! user's body metrics.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Named Policy**: Multipliers and thresholds live in constants
//! 3. **Type Safety**: Gender and activity level are enums, parsed at the edge

use crate::errors::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Profile Enums
// ============================================================================

/// Gender used for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a free-form label. Only "male" selects the male formulas; any
    /// other label takes the female offset and calorie floor.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtremelyActive,
}

/// Activity multipliers applied to BMR
pub const ACTIVITY_MULTIPLIERS: [(ActivityLevel, f64); 5] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::LightlyActive, 1.375),
    (ActivityLevel::ModeratelyActive, 1.55),
    (ActivityLevel::VeryActive, 1.725),
    (ActivityLevel::ExtremelyActive, 1.9),
];

/// Multiplier used when an activity label is not recognized
pub const FALLBACK_ACTIVITY_LEVEL: ActivityLevel = ActivityLevel::ModeratelyActive;

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        ACTIVITY_MULTIPLIERS
            .iter()
            .find(|(level, _)| level == self)
            .map(|(_, m)| *m)
            .unwrap_or(1.55)
    }

    /// Whether this level qualifies for the higher protein floor
    pub fn is_high_activity(&self) -> bool {
        matches!(self, ActivityLevel::VeryActive | ActivityLevel::ExtremelyActive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    /// Lenient parse: unknown labels fall back to moderately active
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(FALLBACK_ACTIVITY_LEVEL)
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    /// Strict parse accepting "very_active", "very active" and "very-active"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| format!("Unknown activity level: {}", s))
    }
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the BMI range for this category (lower bound inclusive)
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn ensure_positive(value: f64, field: &str) -> MetricsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MetricsError::invalid(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> MetricsResult<f64> {
    ensure_positive(height_cm, "height_cm")?;
    ensure_positive(weight_kg, "weight_kg")?;
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// BMI value together with its category
pub fn calculate_bmi_with_category(weight_kg: f64, height_cm: f64) -> MetricsResult<(f64, BmiCategory)> {
    let bmi = calculate_bmi(weight_kg, height_cm)?;
    Ok((bmi, classify_bmi(bmi)))
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    gender: Gender,
) -> MetricsResult<f64> {
    ensure_positive(weight_kg, "weight_kg")?;
    ensure_positive(height_cm, "height_cm")?;
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    Ok(match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// TDEE for an untyped activity label, defaulting unknown labels to
/// moderately active
pub fn calculate_tdee_for_label(bmr: f64, activity_label: &str) -> f64 {
    calculate_tdee(bmr, ActivityLevel::from_label(activity_label))
}
