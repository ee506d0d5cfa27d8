//! SlimSense WASM Module
//!
//! WebAssembly bindings over the shared analytics engine so the browser
//! can preview BMI, energy needs, goals and weight statistics offline.
//! Structured inputs and outputs cross the boundary as JSON strings.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use slimsense_shared::health_metrics::{self, Gender};
use slimsense_shared::models::{BodyProfile, WeightSample};
use slimsense_shared::stats::{build_weight_stats, AnalyticsPolicy};
use slimsense_shared::validation::{check_field, validate_age, validate_height_cm, validate_weight};
use wasm_bindgen::prelude::*;

/// Weight sample as sent from JS; ids are assigned here
#[derive(Debug, Deserialize)]
struct SampleInput {
    timestamp: DateTime<Utc>,
    weight_kg: f64,
    #[serde(default)]
    note: Option<String>,
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, JsValue> {
    bmi(weight_kg, height_cm).map_err(to_js)
}

/// BMI category label ("Underweight", "Normal", "Overweight", "Obese")
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).to_string()
}

/// Mifflin-St Jeor BMR; any gender other than "male" uses the female offset
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> Result<f64, JsValue> {
    bmr(weight_kg, height_cm, age_years, gender).map_err(to_js)
}

/// TDEE for an activity label; unknown labels count as moderately active
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> f64 {
    health_metrics::calculate_tdee_for_label(bmr, activity_level)
}

/// Range-check a JSON `BodyProfile` before submitting it; the error names
/// the first offending field
#[wasm_bindgen]
pub fn validate_profile(profile_json: &str) -> Result<(), JsValue> {
    parse_profile(profile_json).map(|_| ()).map_err(to_js)
}

/// Nutrition goal for a JSON `BodyProfile`, returned as JSON
#[wasm_bindgen]
pub fn nutrition_goals(profile_json: &str) -> Result<String, JsValue> {
    goals_json(profile_json).map_err(to_js)
}

/// Weight statistics for JSON samples and profile at `now_ms` (epoch millis)
#[wasm_bindgen]
pub fn weight_stats(samples_json: &str, profile_json: &str, now_ms: f64) -> Result<String, JsValue> {
    stats_json(samples_json, profile_json, now_ms).map_err(to_js)
}

fn bmi(weight_kg: f64, height_cm: f64) -> Result<f64, String> {
    health_metrics::calculate_bmi(weight_kg, height_cm).map_err(|e| e.to_string())
}

fn bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: &str) -> Result<f64, String> {
    health_metrics::calculate_bmr(weight_kg, height_cm, age_years, Gender::from_label(gender))
        .map_err(|e| e.to_string())
}

fn parse_profile(profile_json: &str) -> Result<BodyProfile, String> {
    let profile: BodyProfile =
        serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile: {}", e))?;
    check_field("current_weight", validate_weight(profile.current_weight_kg))?;
    check_field("target_weight", validate_weight(profile.target_weight_kg))?;
    check_field("height_cm", validate_height_cm(profile.height_cm))?;
    check_field("age", validate_age(profile.age_years))?;
    Ok(profile)
}

fn goals_json(profile_json: &str) -> Result<String, String> {
    let profile = parse_profile(profile_json)?;
    let goal = slimsense_shared::goals::calculate_nutrition_goal(&profile).map_err(|e| e.to_string())?;
    serde_json::to_string(&goal).map_err(|e| e.to_string())
}

fn stats_json(samples_json: &str, profile_json: &str, now_ms: f64) -> Result<String, String> {
    let inputs: Vec<SampleInput> =
        serde_json::from_str(samples_json).map_err(|e| format!("Invalid samples: {}", e))?;
    let profile = parse_profile(profile_json)?;
    let now = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .ok_or_else(|| format!("Invalid timestamp: {}", now_ms))?;

    let samples: Vec<WeightSample> = inputs
        .into_iter()
        .map(|input| {
            let sample = WeightSample::new(input.timestamp, input.weight_kg);
            match input.note {
                Some(note) => sample.with_note(note),
                None => sample,
            }
        })
        .collect();

    let stats = build_weight_stats(&samples, &profile, now, &AnalyticsPolicy::default())
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&stats).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "gender": "male",
        "age_years": 35,
        "height_cm": 180.0,
        "activity_level": "moderately_active",
        "current_weight_kg": 90.0,
        "target_weight_kg": 80.0
    }"#;

    #[test]
    fn test_bmi() {
        let value = bmi(70.0, 175.0).unwrap();
        assert!((value - 22.86).abs() < 0.01);
        assert_eq!(classify_bmi(value), "Normal");
        assert!(bmi(70.0, 0.0).is_err());
    }

    #[test]
    fn test_bmr_and_tdee() {
        let male = bmr(70.0, 175.0, 30, "Male").unwrap();
        assert!((male - 1648.75).abs() < 1e-9);
        let other = bmr(70.0, 175.0, 30, "nonbinary").unwrap();
        assert!((male - other - 166.0).abs() < 1e-9);
        assert!((calculate_tdee(1000.0, "unknown") - 1550.0).abs() < 1e-9);
        assert!((calculate_tdee(1000.0, "very active") - 1725.0).abs() < 1e-9);
    }

    #[test]
    fn test_goals_json() {
        let json = goals_json(PROFILE).unwrap();
        let goal: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(goal["water_goal_ml"], 2970);
        assert!(goal["calorie_goal"].as_i64().unwrap() >= 1500);
        assert!(goals_json("{}").unwrap_err().starts_with("Invalid profile"));
    }

    #[test]
    fn test_parse_profile_names_out_of_range_field() {
        let mut profile: serde_json::Value = serde_json::from_str(PROFILE).unwrap();
        profile["age_years"] = serde_json::json!(12);
        let err = parse_profile(&profile.to_string()).unwrap_err();
        assert!(err.starts_with("Age: "));

        profile["age_years"] = serde_json::json!(35);
        profile["target_weight_kg"] = serde_json::json!(15.0);
        let err = parse_profile(&profile.to_string()).unwrap_err();
        assert!(err.starts_with("Target Weight: "));
    }

    #[test]
    fn test_stats_json() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 8, 0, 0).unwrap();
        let samples = r#"[
            {"timestamp": "2024-06-23T08:00:00Z", "weight_kg": 89.0},
            {"timestamp": "2024-06-30T08:00:00Z", "weight_kg": 88.0, "note": "weekly"}
        ]"#;

        let json = stats_json(samples, PROFILE, now.timestamp_millis() as f64).unwrap();
        let stats: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(stats["current_weight"], 88.0);
        assert_eq!(stats["weekly_change"], -1.0);
        assert_eq!(stats["trend"][1]["note"], "weekly");
    }
}
