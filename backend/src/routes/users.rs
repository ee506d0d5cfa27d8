//! User profile API routes

use crate::error::ApiResult;
use crate::repositories::UserRecord;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use slimsense_shared::models::NutritionGoal;
use slimsense_shared::types::{CreateUserRequest, UpdateUserRequest, UserResponse};
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:user_id", get(get_user).put(update_user).delete(delete_user))
        .route("/:user_id/nutrition-goals", post(calculate_nutrition_goals))
}

fn user_response(user: UserRecord) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        email: user.email,
        full_name: user.full_name,
        gender: user.gender.to_string(),
        age: user.age,
        height_cm: user.height_cm,
        activity_level: user.activity_level.to_string(),
        current_weight: user.current_weight,
        starting_weight: user.starting_weight,
        target_weight: user.target_weight,
        target_date: user.target_date,
        bmi: user.bmi,
        bmi_category: user.bmi_category.map(|c| c.to_string()),
        calorie_goal: user.calorie_goal,
        protein_goal: user.protein_goal,
        carbs_goal: user.carbs_goal,
        fat_goal: user.fat_goal,
        dietary_preferences: user.dietary_preferences,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

/// POST /api/v1/users - Create a user profile
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::create_user(state.store(), req).await?;
    Ok((StatusCode::CREATED, Json(user_response(user))))
}

/// GET /api/v1/users/:user_id
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_user(state.store(), user_id).await?;
    Ok(Json(user_response(user)))
}

/// PUT /api/v1/users/:user_id - Partial profile update
async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::update_user(state.store(), user_id, req).await?;
    Ok(Json(user_response(user)))
}

/// DELETE /api/v1/users/:user_id - Delete the user and all their logs
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    UserService::delete_user(state.store(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/:user_id/nutrition-goals - Recompute and store goals
async fn calculate_nutrition_goals(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<NutritionGoal>> {
    let goal = UserService::calculate_nutrition_goals(state.store(), user_id).await?;
    Ok(Json(goal))
}
