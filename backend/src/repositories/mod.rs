//! Store repositories
//!
//! Data access layer over the in-memory tables. Functions take the tables
//! borrowed from a store guard so services control lock scope.

pub mod nutrition;
pub mod user;
pub mod weight;

pub use nutrition::{CreateFoodLog, FoodLogRecord, FoodLogRepository, UpdateFoodLog};
pub use user::{CreateUser, UpdateUser, UserRecord, UserRepository};
pub use weight::{CreateWeightLog, WeightLogRecord, WeightRepository};
