//! User profile service
//!
//! Profile creation, partial updates with BMI upkeep, deletion and
//! nutrition goal computation.

use crate::db::Store;
use crate::error::ApiError;
use crate::repositories::{CreateUser, UpdateUser, UserRecord, UserRepository};
use slimsense_shared::goals::calculate_nutrition_goal;
use slimsense_shared::health_metrics::{calculate_bmi_with_category, ActivityLevel, Gender};
use slimsense_shared::models::{BodyProfile, NutritionGoal};
use slimsense_shared::types::{CreateUserRequest, UpdateUserRequest};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// User service for profile operations
pub struct UserService;

impl UserService {
    /// Create a profile with cached BMI and default nutrition goals
    #[instrument(skip(store, req), fields(email = %req.email))]
    pub async fn create_user(store: &Store, req: CreateUserRequest) -> Result<UserRecord, ApiError> {
        req.validate()?;

        let gender = Gender::from_label(&req.gender);
        let activity_level = parse_activity_level(&req.activity_level);
        let bmi = calculate_bmi_with_category(req.current_weight, req.height_cm)?;

        let profile = BodyProfile {
            gender,
            age_years: req.age,
            height_cm: req.height_cm,
            activity_level,
            current_weight_kg: req.current_weight,
            starting_weight_kg: Some(req.current_weight),
            target_weight_kg: req.target_weight,
            target_date: req.target_date,
            bmi: Some(bmi.0),
            bmi_category: Some(bmi.1),
        };
        let goal = calculate_nutrition_goal(&profile)?;

        let mut tables = store.write().await;
        if UserRepository::find_by_email(&tables, &req.email).is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let user = UserRepository::create(
            &mut tables,
            CreateUser {
                email: req.email,
                full_name: req.full_name,
                gender,
                age: req.age,
                height_cm: req.height_cm,
                activity_level,
                current_weight: req.current_weight,
                target_weight: req.target_weight,
                target_date: req.target_date,
                dietary_preferences: req.dietary_preferences,
                bmi: Some(bmi),
                goal: Some(goal),
            },
        )
        .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, calorie_goal = goal.calorie_goal, "User created");
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(store: &Store, user_id: Uuid) -> Result<UserRecord, ApiError> {
        let tables = store.read().await;
        UserRepository::find_by_id(&tables, user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Apply a partial update; BMI follows weight and height changes
    #[instrument(skip(store, req))]
    pub async fn update_user(
        store: &Store,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserRecord, ApiError> {
        req.validate()?;

        let mut tables = store.write().await;
        let current = UserRepository::find_by_id(&tables, user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let bmi = if req.current_weight.is_some() || req.height_cm.is_some() {
            let weight = req.current_weight.unwrap_or(current.current_weight);
            let height = req.height_cm.unwrap_or(current.height_cm);
            Some(calculate_bmi_with_category(weight, height)?)
        } else {
            None
        };

        let updates = UpdateUser {
            full_name: req.full_name,
            gender: req.gender.as_deref().map(Gender::from_label),
            age: req.age,
            height_cm: req.height_cm,
            activity_level: req.activity_level.as_deref().map(parse_activity_level),
            current_weight: req.current_weight,
            starting_weight: req.starting_weight,
            target_weight: req.target_weight,
            target_date: req.target_date,
            dietary_preferences: req.dietary_preferences,
            bmi,
            calorie_goal: req.calorie_goal,
            protein_goal: req.protein_goal,
            carbs_goal: req.carbs_goal,
            fat_goal: req.fat_goal,
        };

        let user = UserRepository::update(&mut tables, user_id, updates).map_err(ApiError::Internal)?;
        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Delete a user and all their logs
    #[instrument(skip(store))]
    pub async fn delete_user(store: &Store, user_id: Uuid) -> Result<(), ApiError> {
        let mut tables = store.write().await;
        if !UserRepository::delete(&mut tables, user_id) {
            return Err(ApiError::NotFound("User not found".to_string()));
        }
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Recompute nutrition goals from the stored profile and persist them
    #[instrument(skip(store))]
    pub async fn calculate_nutrition_goals(
        store: &Store,
        user_id: Uuid,
    ) -> Result<NutritionGoal, ApiError> {
        let mut tables = store.write().await;
        let user = UserRepository::find_by_id(&tables, user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let goal = calculate_nutrition_goal(&user.body_profile())?;
        UserRepository::update(&mut tables, user_id, UpdateUser::default().with_goal(&goal))
            .map_err(ApiError::Internal)?;

        metrics::counter!("nutrition_goals_computed_total").increment(1);
        info!(
            user_id = %user_id,
            calorie_goal = goal.calorie_goal,
            protein_goal = goal.protein_goal_g,
            "Nutrition goals computed"
        );
        Ok(goal)
    }
}

/// Unknown labels count as moderately active
fn parse_activity_level(label: &str) -> ActivityLevel {
    label.parse().unwrap_or_else(|_| {
        warn!(activity_level = %label, "Unknown activity level, using fallback");
        ActivityLevel::from_label(label)
    })
}
