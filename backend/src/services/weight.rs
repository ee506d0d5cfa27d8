//! Weight tracking service
//!
//! Provides business logic for weight tracking including:
//! - Weight logging with profile synchronisation
//! - History queries by date range
//! - Statistics (trend windows, forecast, BMI)
//!
//! Each write holds the store's write guard for the whole
//! insert-and-resync, so the profile never observes a half-applied log.

use crate::db::{Store, Tables};
use crate::error::ApiError;
use crate::repositories::{
    CreateWeightLog, UpdateUser, UserRecord, UserRepository, WeightLogRecord, WeightRepository,
};
use chrono::{NaiveTime, Utc};
use slimsense_shared::health_metrics::calculate_bmi_with_category;
use slimsense_shared::models::{WeightSample, WeightStatsSnapshot};
use slimsense_shared::stats::{build_weight_stats, AnalyticsPolicy};
use slimsense_shared::types::{LogWeightRequest, UpdateWeightLogRequest, WeightLogQuery};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Weight service for business logic
pub struct WeightService;

impl WeightService {
    /// Log a weight sample and resync the profile to the latest sample
    #[instrument(skip(store, req), fields(weight_kg = req.weight_kg))]
    pub async fn log_weight(
        store: &Store,
        user_id: Uuid,
        req: LogWeightRequest,
    ) -> Result<WeightLogRecord, ApiError> {
        req.validate()?;

        let mut tables = store.write().await;
        require_user(&tables, user_id)?;

        let record = WeightRepository::create(
            &mut tables,
            CreateWeightLog {
                user_id,
                weight_kg: req.weight_kg,
                logged_at: req.logged_at.unwrap_or_else(Utc::now),
                notes: req.notes,
            },
        )
        .map_err(ApiError::Internal)?;

        sync_profile_to_latest(&mut tables, user_id)?;

        metrics::counter!("weight_logs_created_total").increment(1);
        info!(user_id = %user_id, log_id = %record.id, "Weight logged");
        Ok(record)
    }

    /// Get weight history, oldest first
    ///
    /// `end` includes the whole end day. At most `limit` logs are
    /// returned, keeping the most recent.
    pub async fn get_weight_logs(
        store: &Store,
        user_id: Uuid,
        query: WeightLogQuery,
    ) -> Result<Vec<WeightLogRecord>, ApiError> {
        if let (Some(start), Some(end)) = (query.start, query.end) {
            if start > end {
                return Err(ApiError::BadRequest(
                    "start date must not be after end date".to_string(),
                ));
            }
        }

        let start = query.start.map(|d| d.and_time(NaiveTime::MIN).and_utc());
        let end = query
            .end
            .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
            .map(|dt| dt.and_utc());

        let tables = store.read().await;
        require_user(&tables, user_id)?;

        let logs = WeightRepository::get_by_date_range(
            &tables,
            user_id,
            start,
            end,
            query.effective_limit(),
        );
        debug!(user_id = %user_id, count = logs.len(), "Weight history fetched");
        Ok(logs)
    }

    /// Edit a weight log owned by `user_id`
    #[instrument(skip(store, req))]
    pub async fn update_weight_log(
        store: &Store,
        user_id: Uuid,
        log_id: Uuid,
        req: UpdateWeightLogRequest,
    ) -> Result<WeightLogRecord, ApiError> {
        req.validate()?;

        let mut tables = store.write().await;
        let existing = owned_log(&tables, user_id, log_id)?;
        let was_latest = WeightRepository::get_latest(&tables, user_id).map(|l| l.id) == Some(log_id);

        let updated = WeightRepository::update(&mut tables, log_id, req.weight_kg, req.notes)
            .map_err(ApiError::Internal)?;

        if was_latest && updated.weight_kg != existing.weight_kg {
            sync_profile_to_latest(&mut tables, user_id)?;
        }

        info!(user_id = %user_id, log_id = %log_id, "Weight log updated");
        Ok(updated)
    }

    /// Delete a weight log owned by `user_id`
    #[instrument(skip(store))]
    pub async fn delete_weight_log(store: &Store, user_id: Uuid, log_id: Uuid) -> Result<(), ApiError> {
        let mut tables = store.write().await;
        owned_log(&tables, user_id, log_id)?;
        let was_latest = WeightRepository::get_latest(&tables, user_id).map(|l| l.id) == Some(log_id);

        WeightRepository::delete(&mut tables, log_id);

        if was_latest {
            sync_profile_to_latest(&mut tables, user_id)?;
        }

        info!(user_id = %user_id, log_id = %log_id, "Weight log deleted");
        Ok(())
    }

    /// Build the statistics snapshot for a user
    #[instrument(skip(store, policy))]
    pub async fn get_weight_stats(
        store: &Store,
        policy: &AnalyticsPolicy,
        user_id: Uuid,
    ) -> Result<WeightStatsSnapshot, ApiError> {
        let (user, samples) = {
            let tables = store.read().await;
            let user = require_user(&tables, user_id)?;
            let samples: Vec<WeightSample> = WeightRepository::list_for_user(&tables, user_id)
                .iter()
                .map(WeightLogRecord::to_sample)
                .collect();
            (user, samples)
        };

        let stats = build_weight_stats(&samples, &user.body_profile(), Utc::now(), policy)?;
        debug!(
            user_id = %user_id,
            samples = samples.len(),
            has_forecast = stats.estimated_completion_date.is_some(),
            "Weight stats built"
        );
        Ok(stats)
    }
}

fn require_user(tables: &Tables, user_id: Uuid) -> Result<UserRecord, ApiError> {
    UserRepository::find_by_id(tables, user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

fn owned_log(tables: &Tables, user_id: Uuid, log_id: Uuid) -> Result<WeightLogRecord, ApiError> {
    let log = WeightRepository::get_by_id(tables, log_id)
        .ok_or_else(|| ApiError::NotFound("Weight log not found".to_string()))?;
    if log.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Weight log belongs to another user".to_string(),
        ));
    }
    Ok(log)
}

/// Point the profile's current weight and BMI at the latest remaining log
///
/// The starting weight is only filled in when absent. With no logs left
/// the profile is left as is.
fn sync_profile_to_latest(tables: &mut Tables, user_id: Uuid) -> Result<(), ApiError> {
    let Some(latest) = WeightRepository::get_latest(tables, user_id) else {
        return Ok(());
    };
    let user = require_user(tables, user_id)?;

    let bmi = calculate_bmi_with_category(latest.weight_kg, user.height_cm)?;
    let updates = UpdateUser {
        current_weight: Some(latest.weight_kg),
        starting_weight: user.starting_weight.is_none().then_some(latest.weight_kg),
        bmi: Some(bmi),
        ..Default::default()
    };
    UserRepository::update(tables, user_id, updates).map_err(ApiError::Internal)?;

    debug!(user_id = %user_id, current_weight = latest.weight_kg, "Profile synced to latest weight");
    Ok(())
}
