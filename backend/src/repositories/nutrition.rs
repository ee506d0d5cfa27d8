//! Food log repository for store operations

use crate::db::Tables;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use slimsense_shared::nutrition::{FoodEntry, MealType};
use uuid::Uuid;

/// Food log record
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: Option<f64>,
    pub logged_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl FoodLogRecord {
    pub fn to_entry(&self) -> FoodEntry {
        FoodEntry {
            id: self.id,
            food_name: self.food_name.clone(),
            meal_type: self.meal_type,
            calories: self.calories,
            protein_g: self.protein,
            carbs_g: self.carbs,
            fat_g: self.fat,
            fiber_g: self.fiber,
            logged_at: self.logged_at,
        }
    }
}

/// Input for creating a food log
#[derive(Debug, Clone)]
pub struct CreateFoodLog {
    pub user_id: Uuid,
    pub food_name: String,
    pub meal_type: MealType,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: Option<f64>,
    pub logged_at: DateTime<Utc>,
    pub is_favorite: bool,
}

/// Field edits for a food log; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateFoodLog {
    pub food_name: Option<String>,
    pub meal_type: Option<MealType>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub logged_at: Option<DateTime<Utc>>,
    pub is_favorite: Option<bool>,
}

/// Food log repository
pub struct FoodLogRepository;

impl FoodLogRepository {
    /// Log a food entry
    pub fn create(tables: &mut Tables, input: CreateFoodLog) -> Result<FoodLogRecord> {
        if !tables.users.contains_key(&input.user_id) {
            anyhow::bail!("food log references unknown user {}", input.user_id);
        }

        let record = FoodLogRecord {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            food_name: input.food_name,
            meal_type: input.meal_type,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
            fiber: input.fiber,
            logged_at: input.logged_at,
            is_favorite: input.is_favorite,
            created_at: Utc::now(),
        };
        tables.food_logs.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn get_by_id(tables: &Tables, id: Uuid) -> Option<FoodLogRecord> {
        tables.food_logs.get(&id).cloned()
    }

    /// Get food logs for a user on a specific UTC date, oldest first
    pub fn get_by_date(tables: &Tables, user_id: Uuid, date: NaiveDate) -> Vec<FoodLogRecord> {
        let mut logs: Vec<FoodLogRecord> = tables
            .food_logs
            .values()
            .filter(|log| log.user_id == user_id && log.logged_at.date_naive() == date)
            .cloned()
            .collect();
        logs.sort_by_key(|log| (log.logged_at, log.created_at));
        logs
    }

    /// Apply field edits to a food log
    pub fn update(tables: &mut Tables, id: Uuid, updates: UpdateFoodLog) -> Result<FoodLogRecord> {
        let Some(log) = tables.food_logs.get_mut(&id) else {
            anyhow::bail!("food log {} vanished during update", id);
        };
        if let Some(v) = updates.food_name {
            log.food_name = v;
        }
        if let Some(v) = updates.meal_type {
            log.meal_type = v;
        }
        if let Some(v) = updates.calories {
            log.calories = v;
        }
        if let Some(v) = updates.protein {
            log.protein = v;
        }
        if let Some(v) = updates.carbs {
            log.carbs = v;
        }
        if let Some(v) = updates.fat {
            log.fat = v;
        }
        if let Some(v) = updates.fiber {
            log.fiber = Some(v);
        }
        if let Some(v) = updates.logged_at {
            log.logged_at = v;
        }
        if let Some(v) = updates.is_favorite {
            log.is_favorite = v;
        }
        Ok(log.clone())
    }

    /// A user's favourite food logs, ordered by food name
    pub fn favorites(tables: &Tables, user_id: Uuid) -> Vec<FoodLogRecord> {
        let mut logs: Vec<FoodLogRecord> = tables
            .food_logs
            .values()
            .filter(|log| log.user_id == user_id && log.is_favorite)
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.food_name.cmp(&b.food_name).then(a.logged_at.cmp(&b.logged_at)));
        logs
    }

    /// Delete a food log, returning it if it existed
    pub fn delete(tables: &mut Tables, id: Uuid) -> Option<FoodLogRecord> {
        tables.food_logs.remove(&id)
    }
}
