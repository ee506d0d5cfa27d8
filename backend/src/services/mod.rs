//! Business logic services
//!
//! Services validate input, take the store lock for the span of one
//! operation and call into the shared analytics engine.

pub mod nutrition;
pub mod user;
pub mod weight;

pub use nutrition::NutritionService;
pub use user::UserService;
pub use weight::WeightService;
