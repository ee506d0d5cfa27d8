//! Nutrition goal arbitration
//!
//! Derives daily calorie and macronutrient targets from a body profile:
//! TDEE, then a tiered deficit (weight loss), flat surplus (weight gain)
//! or maintenance, then a macro split with a protein floor.

use crate::errors::{MetricsError, MetricsResult};
use crate::health_metrics::{calculate_bmr, calculate_tdee, ActivityLevel, Gender};
use crate::models::{BodyProfile, NutritionGoal, WeightDirection};

// ============================================================================
// Policy Constants
// ============================================================================

/// Deficit tiers for weight loss as (gap strictly above kg, kcal/day),
/// checked in order
pub const DEFICIT_TIERS: [(f64, f64); 2] = [(20.0, 750.0), (10.0, 600.0)];

/// Deficit when the gap does not exceed any tier
pub const STANDARD_DEFICIT_KCAL: f64 = 500.0;

/// Surplus for weight gain
pub const GAIN_SURPLUS_KCAL: f64 = 500.0;

/// Minimum daily calories while losing weight
pub const MALE_CALORIE_FLOOR: f64 = 1500.0;
pub const FEMALE_CALORIE_FLOOR: f64 = 1200.0;

/// Share of calories per macronutrient
pub const PROTEIN_SHARE: f64 = 0.30;
pub const CARBS_SHARE: f64 = 0.45;
pub const FAT_SHARE: f64 = 0.25;

/// Energy density in kcal per gram
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Protein floor in grams per kg of body weight
pub const PROTEIN_PER_KG_STANDARD: f64 = 1.6;
pub const PROTEIN_PER_KG_HIGH_ACTIVITY: f64 = 1.8;

/// Fiber grams per 1000 kcal
pub const FIBER_PER_1000_KCAL: f64 = 14.0;

/// Water ml per kg of body weight
pub const WATER_ML_PER_KG: f64 = 33.0;

// ============================================================================
// Calorie Goal
// ============================================================================

/// Deficit for a given absolute weight gap
pub fn deficit_for_gap(gap_kg: f64) -> f64 {
    DEFICIT_TIERS
        .iter()
        .find(|(threshold, _)| gap_kg > *threshold)
        .map(|(_, deficit)| *deficit)
        .unwrap_or(STANDARD_DEFICIT_KCAL)
}

/// Calorie floor applied during weight loss
pub fn calorie_floor(gender: Gender) -> f64 {
    match gender {
        Gender::Male => MALE_CALORIE_FLOOR,
        Gender::Female => FEMALE_CALORIE_FLOOR,
    }
}

/// Daily calorie goal for a TDEE and a current/target weight pair
pub fn arbitrate_calorie_goal(
    tdee: f64,
    current_weight_kg: f64,
    target_weight_kg: f64,
    gender: Gender,
) -> i32 {
    let calories = match WeightDirection::between(current_weight_kg, target_weight_kg) {
        WeightDirection::Lose => {
            let deficit = deficit_for_gap((current_weight_kg - target_weight_kg).abs());
            calorie_floor(gender).max(tdee - deficit)
        }
        WeightDirection::Gain => tdee + GAIN_SURPLUS_KCAL,
        WeightDirection::Maintain => tdee,
    };
    calories.round() as i32
}

// ============================================================================
// Macronutrients
// ============================================================================

/// Gram targets from the percentage split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

/// Split a calorie goal 30/45/25 into whole grams (floored)
pub fn split_macros(calorie_goal: i32) -> MacroSplit {
    let calories = calorie_goal as f64;
    MacroSplit {
        protein_g: (calories * PROTEIN_SHARE / KCAL_PER_GRAM_PROTEIN).floor() as i32,
        carbs_g: (calories * CARBS_SHARE / KCAL_PER_GRAM_CARBS).floor() as i32,
        fat_g: (calories * FAT_SHARE / KCAL_PER_GRAM_FAT).floor() as i32,
    }
}

/// Protein goal after applying the body-weight floor
pub fn protein_goal(split_protein_g: i32, weight_kg: f64, activity_level: ActivityLevel) -> i32 {
    let per_kg = if activity_level.is_high_activity() {
        PROTEIN_PER_KG_HIGH_ACTIVITY
    } else {
        PROTEIN_PER_KG_STANDARD
    };
    split_protein_g.max((weight_kg * per_kg).round() as i32)
}

// ============================================================================
// Full Goal
// ============================================================================

/// Compute the complete nutrition goal for a profile
pub fn calculate_nutrition_goal(profile: &BodyProfile) -> MetricsResult<NutritionGoal> {
    if !profile.target_weight_kg.is_finite() || profile.target_weight_kg <= 0.0 {
        return Err(MetricsError::invalid("target_weight_kg must be a positive number"));
    }

    let bmr = calculate_bmr(
        profile.current_weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
    )?;
    let tdee = calculate_tdee(bmr, profile.activity_level);

    let calorie_goal = arbitrate_calorie_goal(
        tdee,
        profile.current_weight_kg,
        profile.target_weight_kg,
        profile.gender,
    );
    let split = split_macros(calorie_goal);

    Ok(NutritionGoal {
        calorie_goal,
        protein_goal_g: protein_goal(split.protein_g, profile.current_weight_kg, profile.activity_level),
        carbs_goal_g: split.carbs_g,
        fat_goal_g: split.fat_g,
        fiber_goal_g: (calorie_goal as f64 / 1000.0 * FIBER_PER_1000_KCAL).round() as i32,
        water_goal_ml: (profile.current_weight_kg * WATER_ML_PER_KG).round() as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(gender: Gender, current: f64, target: f64, activity: ActivityLevel) -> BodyProfile {
        BodyProfile {
            gender,
            age_years: 35,
            height_cm: 180.0,
            activity_level: activity,
            current_weight_kg: current,
            starting_weight_kg: Some(current),
            target_weight_kg: target,
            target_date: None,
            bmi: None,
            bmi_category: None,
        }
    }

    #[rstest]
    #[case(25.0, 750.0)]
    #[case(20.5, 750.0)]
    #[case(20.0, 600.0)]
    #[case(10.5, 600.0)]
    #[case(10.0, 500.0)]
    #[case(2.0, 500.0)]
    fn test_deficit_tiers(#[case] gap: f64, #[case] expected: f64) {
        assert_eq!(deficit_for_gap(gap), expected);
    }

    #[test]
    fn test_male_floor_binds() {
        // gap 20 is not > 20, so deficit 600; 2000 - 600 = 1400 < 1500
        assert_eq!(arbitrate_calorie_goal(2000.0, 90.0, 70.0, Gender::Male), 1500);
    }

    #[test]
    fn test_female_floor_lower() {
        assert_eq!(arbitrate_calorie_goal(2000.0, 90.0, 70.0, Gender::Female), 1400);
        assert_eq!(arbitrate_calorie_goal(1500.0, 90.0, 70.0, Gender::Female), 1200);
    }

    #[test]
    fn test_gain_adds_flat_surplus() {
        assert_eq!(arbitrate_calorie_goal(2400.4, 60.0, 70.0, Gender::Male), 2900);
    }

    #[test]
    fn test_maintenance_rounds_tdee() {
        assert_eq!(arbitrate_calorie_goal(2210.6, 70.0, 70.0, Gender::Female), 2211);
    }

    #[test]
    fn test_macro_split_floors() {
        let split = split_macros(2275);
        assert_eq!(split.protein_g, 170);
        assert_eq!(split.carbs_g, 255);
        assert_eq!(split.fat_g, 63);
    }

    #[test]
    fn test_protein_floor_by_activity() {
        // split protein 90g loses to 100kg * 1.6 = 160g
        assert_eq!(protein_goal(90, 100.0, ActivityLevel::Sedentary), 160);
        assert_eq!(protein_goal(90, 100.0, ActivityLevel::VeryActive), 180);
        assert_eq!(protein_goal(90, 100.0, ActivityLevel::ExtremelyActive), 180);
        assert_eq!(protein_goal(200, 100.0, ActivityLevel::ExtremelyActive), 200);
    }

    #[test]
    fn test_full_goal_weight_loss() {
        // BMR = 900 + 1125 - 175 + 5 = 1855, TDEE = 2875.25, deficit 600
        let goal = calculate_nutrition_goal(&profile(
            Gender::Male,
            90.0,
            70.0,
            ActivityLevel::ModeratelyActive,
        ))
        .unwrap();

        assert_eq!(goal.calorie_goal, 2275);
        assert_eq!(goal.protein_goal_g, 170);
        assert_eq!(goal.carbs_goal_g, 255);
        assert_eq!(goal.fat_goal_g, 63);
        assert_eq!(goal.fiber_goal_g, 32);
        assert_eq!(goal.water_goal_ml, 2970);
    }

    #[test]
    fn test_full_goal_rejects_bad_height() {
        let mut p = profile(Gender::Male, 90.0, 70.0, ActivityLevel::Sedentary);
        p.height_cm = 0.0;
        assert!(calculate_nutrition_goal(&p).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: weight-loss goals never drop below the gender floor
        #[test]
        fn prop_loss_respects_floor(
            current in 50.0f64..200.0,
            delta in 0.5f64..60.0,
            idx in 0usize..5,
            is_male in any::<bool>()
        ) {
            let gender = if is_male { Gender::Male } else { Gender::Female };
            let p = profile(gender, current, (current - delta).max(20.0), ActivityLevel::ALL[idx]);
            prop_assume!(p.current_weight_kg > p.target_weight_kg);
            let goal = calculate_nutrition_goal(&p).unwrap();
            prop_assert!(goal.calorie_goal as f64 >= calorie_floor(gender));
        }

        /// Property: protein is never below the body-weight floor
        #[test]
        fn prop_protein_floor(current in 40.0f64..200.0, target in 40.0f64..200.0, idx in 0usize..5) {
            let p = profile(Gender::Female, current, target, ActivityLevel::ALL[idx]);
            let goal = calculate_nutrition_goal(&p).unwrap();
            let floor = (current * PROTEIN_PER_KG_STANDARD).round() as i32;
            prop_assert!(goal.protein_goal_g >= floor);
        }

        /// Property: the goal is a pure function of the profile
        #[test]
        fn prop_goal_deterministic(current in 40.0f64..200.0, target in 40.0f64..200.0) {
            let p = profile(Gender::Male, current, target, ActivityLevel::LightlyActive);
            prop_assert_eq!(calculate_nutrition_goal(&p).unwrap(), calculate_nutrition_goal(&p).unwrap());
        }
    }
}
