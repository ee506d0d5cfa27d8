//! Daily nutrition summary
//!
//! Totals one day's food entries, groups them by meal and compares the
//! totals against the user's stored goals.

use crate::goals::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Meal a food entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Unknown labels are filed as snacks
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => MealType::Snack,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub food_name: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

/// Goals the day is measured against; any of them may be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGoals {
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fat_goal: Option<i32>,
}

/// Share of calories per macronutrient, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPercentages {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Entries grouped by meal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealBreakdown {
    pub breakfast: Vec<FoodEntry>,
    pub lunch: Vec<FoodEntry>,
    pub dinner: Vec<FoodEntry>,
    pub snack: Vec<FoodEntry>,
}

impl MealBreakdown {
    fn push(&mut self, entry: FoodEntry) {
        match entry.meal_type {
            MealType::Breakfast => self.breakfast.push(entry),
            MealType::Lunch => self.lunch.push(entry),
            MealType::Dinner => self.dinner.push(entry),
            MealType::Snack => self.snack.push(entry),
        }
    }
}

/// Summary of one day's intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub total_calories: i64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_fiber: f64,
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fat_goal: Option<i32>,
    pub meal_breakdown: MealBreakdown,
    pub remaining_calories: Option<i64>,
    pub nutrient_percentages: Option<MacroPercentages>,
}

/// Summarize a day of food entries
pub fn summarize_day(entries: &[FoodEntry], goals: StoredGoals) -> NutritionSummary {
    let mut total_calories: i64 = 0;
    let mut total_protein = 0.0;
    let mut total_carbs = 0.0;
    let mut total_fat = 0.0;
    let mut total_fiber = 0.0;
    let mut meal_breakdown = MealBreakdown::default();

    for entry in entries {
        total_calories += i64::from(entry.calories);
        total_protein += entry.protein_g;
        total_carbs += entry.carbs_g;
        total_fat += entry.fat_g;
        total_fiber += entry.fiber_g.unwrap_or(0.0);
        meal_breakdown.push(entry.clone());
    }

    let nutrient_percentages = (total_calories > 0).then(|| {
        let calories = total_calories as f64;
        MacroPercentages {
            protein: total_protein * KCAL_PER_GRAM_PROTEIN / calories * 100.0,
            carbs: total_carbs * KCAL_PER_GRAM_CARBS / calories * 100.0,
            fat: total_fat * KCAL_PER_GRAM_FAT / calories * 100.0,
        }
    });

    NutritionSummary {
        total_calories,
        total_protein,
        total_carbs,
        total_fat,
        total_fiber,
        calorie_goal: goals.calorie_goal,
        protein_goal: goals.protein_goal,
        carbs_goal: goals.carbs_goal,
        fat_goal: goals.fat_goal,
        meal_breakdown,
        remaining_calories: goals.calorie_goal.map(|goal| i64::from(goal) - total_calories),
        nutrient_percentages,
    }
}
