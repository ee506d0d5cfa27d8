//! SlimSense Shared Library
//!
//! The analytics engine (body metrics, goal arbitration, trend matching,
//! forecasting and statistics) plus the request/response types shared by
//! the backend and WASM modules.

pub mod errors;
pub mod forecast;
pub mod goals;
pub mod health_metrics;
pub mod models;
pub mod nutrition;
pub mod stats;
pub mod trend;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use forecast::{project_completion, Forecast, DEFAULT_FORECAST_WINDOW_DAYS};
pub use goals::calculate_nutrition_goal;
pub use health_metrics::*;
pub use models::*;
pub use nutrition::{summarize_day, FoodEntry, MealType, NutritionSummary, StoredGoals};
pub use stats::{build_weight_stats, AnalyticsPolicy};
pub use trend::{find_nearest_sample, TrendWindow};
pub use types::*;
