//! Food logging and nutrition summary API routes

use crate::error::ApiResult;
use crate::repositories::FoodLogRecord;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use slimsense_shared::nutrition::NutritionSummary;
use slimsense_shared::types::{DateQuery, FoodLogResponse, LogFoodRequest, UpdateFoodLogRequest};
use uuid::Uuid;

/// Create nutrition routes, nested under `/users/:user_id`
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/food-logs", post(log_food).get(get_food_logs))
        .route("/food-logs/:log_id", put(update_food_log).delete(delete_food_log))
        .route("/nutrition/summary", get(get_daily_summary))
        .route("/nutrition/favorites", get(get_favorite_foods))
}

fn food_log_response(log: FoodLogRecord) -> FoodLogResponse {
    FoodLogResponse {
        id: log.id.to_string(),
        food_name: log.food_name,
        meal_type: log.meal_type.to_string(),
        calories: log.calories,
        protein: log.protein,
        carbs: log.carbs,
        fat: log.fat,
        fiber: log.fiber,
        logged_at: log.logged_at,
        is_favorite: log.is_favorite,
    }
}

/// POST /api/v1/users/:user_id/food-logs - Log a food entry
async fn log_food(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodLogResponse>)> {
    let log = NutritionService::log_food(state.store(), user_id, req).await?;
    Ok((StatusCode::CREATED, Json(food_log_response(log))))
}

/// GET /api/v1/users/:user_id/food-logs?date=YYYY-MM-DD
async fn get_food_logs(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Vec<FoodLogResponse>>> {
    let logs = NutritionService::get_food_logs(state.store(), user_id, query.date_or_today()).await?;
    Ok(Json(logs.into_iter().map(food_log_response).collect()))
}

/// PUT /api/v1/users/:user_id/food-logs/:log_id - Edit a food entry
async fn update_food_log(
    State(state): State<AppState>,
    Path((user_id, log_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateFoodLogRequest>,
) -> ApiResult<Json<FoodLogResponse>> {
    let log = NutritionService::update_food_log(state.store(), user_id, log_id, req).await?;
    Ok(Json(food_log_response(log)))
}

/// DELETE /api/v1/users/:user_id/food-logs/:log_id
async fn delete_food_log(
    State(state): State<AppState>,
    Path((user_id, log_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    NutritionService::delete_food_log(state.store(), user_id, log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/:user_id/nutrition/summary?date=YYYY-MM-DD
async fn get_daily_summary(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<NutritionSummary>> {
    let summary =
        NutritionService::get_daily_summary(state.store(), user_id, query.date_or_today()).await?;
    Ok(Json(summary))
}

/// GET /api/v1/users/:user_id/nutrition/favorites - Favourite foods by name
async fn get_favorite_foods(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<FoodLogResponse>>> {
    let logs = NutritionService::get_favorite_foods(state.store(), user_id).await?;
    Ok(Json(logs.into_iter().map(food_log_response).collect()))
}
