//! Weight tracking API routes

use crate::error::ApiResult;
use crate::repositories::WeightLogRecord;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use slimsense_shared::models::WeightStatsSnapshot;
use slimsense_shared::types::{
    LogWeightRequest, UpdateWeightLogRequest, WeightLogQuery, WeightLogResponse,
};
use uuid::Uuid;

/// Create weight routes, nested under `/users/:user_id/weight`
pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_weight).get(get_weight_logs))
        .route("/stats", get(get_weight_stats))
        .route("/:log_id", put(update_weight_log).delete(delete_weight_log))
}

fn weight_log_response(log: WeightLogRecord) -> WeightLogResponse {
    WeightLogResponse {
        id: log.id.to_string(),
        user_id: log.user_id.to_string(),
        weight_kg: log.weight_kg,
        logged_at: log.logged_at,
        notes: log.notes,
        created_at: log.created_at,
    }
}

/// POST /api/v1/users/:user_id/weight - Log a weight entry
///
/// `logged_at` defaults to now. The profile's current weight and BMI
/// follow the latest entry.
async fn log_weight(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<WeightLogResponse>)> {
    let log = WeightService::log_weight(state.store(), user_id, req).await?;
    Ok((StatusCode::CREATED, Json(weight_log_response(log))))
}

/// GET /api/v1/users/:user_id/weight - Weight history, oldest first
///
/// Supports `start`/`end` dates (inclusive) and `limit` (default 100).
async fn get_weight_logs(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<WeightLogQuery>,
) -> ApiResult<Json<Vec<WeightLogResponse>>> {
    let logs = WeightService::get_weight_logs(state.store(), user_id, query).await?;
    Ok(Json(logs.into_iter().map(weight_log_response).collect()))
}

/// GET /api/v1/users/:user_id/weight/stats - Weight statistics
async fn get_weight_stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<WeightStatsSnapshot>> {
    let stats = WeightService::get_weight_stats(state.store(), state.analytics(), user_id).await?;
    Ok(Json(stats))
}

/// PUT /api/v1/users/:user_id/weight/:log_id - Edit a weight entry
async fn update_weight_log(
    State(state): State<AppState>,
    Path((user_id, log_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateWeightLogRequest>,
) -> ApiResult<Json<WeightLogResponse>> {
    let log = WeightService::update_weight_log(state.store(), user_id, log_id, req).await?;
    Ok(Json(weight_log_response(log)))
}

/// DELETE /api/v1/users/:user_id/weight/:log_id
async fn delete_weight_log(
    State(state): State<AppState>,
    Path((user_id, log_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    WeightService::delete_weight_log(state.store(), user_id, log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
