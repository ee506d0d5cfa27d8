//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// User Types
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Free-form; anything other than "male" uses the female formulas
    pub gender: String,
    #[validate(range(min = 13, max = 120, message = "Age must be between 13 and 120"))]
    pub age: i32,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: f64,
    /// e.g. "sedentary", "very active"; unknown labels count as moderately active
    pub activity_level: String,
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub current_weight: f64,
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub target_weight: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

/// Partial user update request
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 13, max = 120, message = "Age must be between 13 and 120"))]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub current_weight: Option<f64>,
    /// Explicitly reset the starting weight
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub starting_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub target_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub calorie_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub protein_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub carbs_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub fat_goal: Option<i32>,
}

/// User response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub gender: String,
    pub age: i32,
    pub height_cm: f64,
    pub activity_level: String,
    pub current_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_weight: Option<f64>,
    pub target_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_goal: Option<i32>,
    pub dietary_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Weight Types
// ============================================================================

/// Weight log entry request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub weight_kg: f64,
    /// Defaults to now
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Weight log edit request
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateWeightLogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 300.0, message = "Weight must be between 20 and 300 kg"))]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Weight log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogResponse {
    pub id: String,
    pub user_id: String,
    pub weight_kg: f64,
    pub logged_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Weight history query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightLogQuery {
    /// Inclusive start date
    pub start: Option<NaiveDate>,
    /// Inclusive end date (the whole day is included)
    pub end: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl WeightLogQuery {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 1000;

    /// Effective limit, clamped to 1..=MAX_LIMIT
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

// ============================================================================
// Nutrition Types
// ============================================================================

/// Log food request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogFoodRequest {
    #[validate(length(min = 1, max = 200, message = "Food name is required"))]
    pub food_name: String,
    /// breakfast, lunch, dinner or snack; anything else is a snack
    pub meal_type: String,
    #[validate(range(min = 0, max = 20000, message = "Calories must be between 0 and 20000"))]
    pub calories: i32,
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein: f64,
    #[validate(range(min = 0.0, message = "Carbohydrates cannot be negative"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Fiber cannot be negative"))]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub logged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Food log edit request; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateFoodLogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200, message = "Food name is required"))]
    pub food_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 20000, message = "Calories must be between 0 and 20000"))]
    pub calories: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Carbohydrates cannot be negative"))]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Fiber cannot be negative"))]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Food log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogResponse {
    pub id: String,
    pub food_name: String,
    pub meal_type: String,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    pub logged_at: DateTime<Utc>,
    pub is_favorite: bool,
}

/// Date query parameter, defaults to today (UTC)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Utc::now().date_naive())
    }
}
