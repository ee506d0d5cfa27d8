//! Food logging and daily nutrition summary service

use crate::db::{Store, Tables};
use crate::error::ApiError;
use crate::repositories::{
    CreateFoodLog, FoodLogRecord, FoodLogRepository, UpdateFoodLog, UserRepository,
};
use chrono::{NaiveDate, Utc};
use slimsense_shared::nutrition::{summarize_day, FoodEntry, MealType, NutritionSummary};
use slimsense_shared::types::{LogFoodRequest, UpdateFoodLogRequest};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    /// Log a food entry
    #[instrument(skip(store, req), fields(meal_type = %req.meal_type))]
    pub async fn log_food(
        store: &Store,
        user_id: Uuid,
        req: LogFoodRequest,
    ) -> Result<FoodLogRecord, ApiError> {
        req.validate()?;

        let mut tables = store.write().await;
        if UserRepository::find_by_id(&tables, user_id).is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        let record = FoodLogRepository::create(
            &mut tables,
            CreateFoodLog {
                user_id,
                food_name: req.food_name,
                meal_type: MealType::from_label(&req.meal_type),
                calories: req.calories,
                protein: req.protein,
                carbs: req.carbs,
                fat: req.fat,
                fiber: req.fiber,
                logged_at: req.logged_at.unwrap_or_else(Utc::now),
                is_favorite: req.is_favorite,
            },
        )
        .map_err(ApiError::Internal)?;

        metrics::counter!("food_logs_created_total").increment(1);
        info!(user_id = %user_id, log_id = %record.id, calories = record.calories, "Food logged");
        Ok(record)
    }

    /// Food logs for one UTC day
    pub async fn get_food_logs(
        store: &Store,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<FoodLogRecord>, ApiError> {
        let tables = store.read().await;
        if UserRepository::find_by_id(&tables, user_id).is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        Ok(FoodLogRepository::get_by_date(&tables, user_id, date))
    }

    /// Edit a food log owned by `user_id`
    #[instrument(skip(store, req))]
    pub async fn update_food_log(
        store: &Store,
        user_id: Uuid,
        log_id: Uuid,
        req: UpdateFoodLogRequest,
    ) -> Result<FoodLogRecord, ApiError> {
        req.validate()?;

        let mut tables = store.write().await;
        owned_log(&tables, user_id, log_id)?;

        let updates = UpdateFoodLog {
            food_name: req.food_name,
            meal_type: req.meal_type.as_deref().map(MealType::from_label),
            calories: req.calories,
            protein: req.protein,
            carbs: req.carbs,
            fat: req.fat,
            fiber: req.fiber,
            logged_at: req.logged_at,
            is_favorite: req.is_favorite,
        };
        let updated =
            FoodLogRepository::update(&mut tables, log_id, updates).map_err(ApiError::Internal)?;

        info!(user_id = %user_id, log_id = %log_id, "Food log updated");
        Ok(updated)
    }

    /// Food logs the user marked as favourite, ordered by food name
    pub async fn get_favorite_foods(
        store: &Store,
        user_id: Uuid,
    ) -> Result<Vec<FoodLogRecord>, ApiError> {
        let tables = store.read().await;
        if UserRepository::find_by_id(&tables, user_id).is_none() {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        Ok(FoodLogRepository::favorites(&tables, user_id))
    }

    /// Delete a food log owned by `user_id`
    #[instrument(skip(store))]
    pub async fn delete_food_log(store: &Store, user_id: Uuid, log_id: Uuid) -> Result<(), ApiError> {
        let mut tables = store.write().await;
        owned_log(&tables, user_id, log_id)?;
        FoodLogRepository::delete(&mut tables, log_id);
        info!(user_id = %user_id, log_id = %log_id, "Food log deleted");
        Ok(())
    }

    /// Summarize a day's intake against the user's stored goals
    pub async fn get_daily_summary(
        store: &Store,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<NutritionSummary, ApiError> {
        let tables = store.read().await;
        let user = UserRepository::find_by_id(&tables, user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let entries: Vec<FoodEntry> = FoodLogRepository::get_by_date(&tables, user_id, date)
            .iter()
            .map(FoodLogRecord::to_entry)
            .collect();
        drop(tables);

        let summary = summarize_day(&entries, user.stored_goals());
        debug!(
            user_id = %user_id,
            %date,
            entries = entries.len(),
            total_calories = summary.total_calories,
            "Daily summary built"
        );
        Ok(summary)
    }
}

/// Look up a food log and check it belongs to `user_id`
fn owned_log(tables: &Tables, user_id: Uuid, log_id: Uuid) -> Result<FoodLogRecord, ApiError> {
    let log = FoodLogRepository::get_by_id(tables, log_id)
        .ok_or_else(|| ApiError::NotFound("Food log not found".to_string()))?;
    if log.user_id != user_id {
        return Err(ApiError::Forbidden("Food log belongs to another user".to_string()));
    }
    Ok(log)
}
