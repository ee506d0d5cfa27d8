//! Integration tests for weight tracking endpoints

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use slimsense_backend::config::AppConfig;

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

#[tokio::test]
async fn test_log_weight_success() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;

    let body = json!({ "weight_kg": 88.5, "notes": "after run" });
    let (status, response) = app
        .post(&format!("/api/v1/users/{}/weight", user.id), &body)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let response = common::parse(&response);
    assert_eq!(response["weight_kg"], 88.5);
    assert_eq!(response["user_id"], user.id.as_str());
    assert!(!response["id"].as_str().unwrap().is_empty());

    let (_, profile) = app.get(&format!("/api/v1/users/{}", user.id)).await;
    let profile = common::parse(&profile);
    assert_eq!(profile["current_weight"], 88.5);
    assert_eq!(profile["starting_weight"], 90.0);
}

#[tokio::test]
async fn test_log_weight_out_of_range() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;

    let (status, response) = app
        .post(
            &format!("/api/v1/users/{}/weight", user.id),
            &json!({ "weight_kg": 12.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::parse(&response)["error"]["field"], "weight_kg");
}

#[tokio::test]
async fn test_get_weight_history_empty() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;

    let (status, response) = app.get(&format!("/api/v1/users/{}/weight", user.id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::parse(&response).as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_weight_history_ordered_and_limited() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;
    let path = format!("/api/v1/users/{}/weight", user.id);

    for (days, weight) in [(2, 89.0), (10, 90.0), (0, 88.0)] {
        let (status, _) = app
            .post(&path, &json!({ "weight_kg": weight, "logged_at": days_ago(days) }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, response) = app.get(&path).await;
    let weights: Vec<f64> = common::parse(&response)
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["weight_kg"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![90.0, 89.0, 88.0]);

    let (_, response) = app.get(&format!("{}?limit=2", path)).await;
    let weights: Vec<f64> = common::parse(&response)
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["weight_kg"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![89.0, 88.0]);
}

#[tokio::test]
async fn test_weight_stats_without_logs() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;

    let (status, response) = app
        .get(&format!("/api/v1/users/{}/weight/stats", user.id))
        .await;

    assert_eq!(status, StatusCode::OK);
    let stats = common::parse(&response);
    assert_eq!(stats["current_weight"], 90.0);
    assert_eq!(stats["total_change"], 0.0);
    assert!(stats["weekly_change"].is_null());
    assert!(stats["estimated_completion_date"].is_null());
    assert_eq!(stats["trend"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_weight_stats_with_history() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;
    let path = format!("/api/v1/users/{}/weight", user.id);

    for (days, weight) in [(28, 90.0), (7, 88.0), (0, 87.0)] {
        app.post(&path, &json!({ "weight_kg": weight, "logged_at": days_ago(days) }))
            .await;
    }

    let (status, response) = app.get(&format!("{}/stats", path)).await;

    assert_eq!(status, StatusCode::OK);
    let stats = common::parse(&response);
    assert_eq!(stats["current_weight"], 87.0);
    assert_eq!(stats["starting_weight"], 90.0);
    assert_eq!(stats["total_change"], -3.0);
    assert_eq!(stats["weekly_change"], -1.0);
    assert_eq!(stats["monthly_change"], -3.0);
    assert_eq!(stats["trend"].as_array().unwrap().len(), 3);
    assert!(stats["estimated_completion_date"].is_string());
}

#[tokio::test]
async fn test_weight_stats_near_flat_trend_has_no_forecast() {
    let app = common::TestApp::new();
    let user = app.create_user(80.0, 70.0).await;
    let path = format!("/api/v1/users/{}/weight", user.id);

    app.post(&path, &json!({ "weight_kg": 80.0000001, "logged_at": days_ago(1) }))
        .await;
    app.post(&path, &json!({ "weight_kg": 80.0 })).await;

    let (status, response) = app.get(&format!("{}/stats", path)).await;

    assert_eq!(status, StatusCode::OK);
    let stats = common::parse(&response);
    assert_eq!(stats["current_weight"], 80.0);
    assert!(stats["estimated_completion_date"].is_null());
}

#[tokio::test]
async fn test_weight_stats_respect_configured_tolerance() {
    let mut config = AppConfig::default();
    config.analytics.weekly_window.tolerance_days = 1;
    let app = common::TestApp::with_config(config);
    let user = app.create_test_user().await;
    let path = format!("/api/v1/users/{}/weight", user.id);

    for (days, weight) in [(10, 90.0), (0, 88.0)] {
        app.post(&path, &json!({ "weight_kg": weight, "logged_at": days_ago(days) }))
            .await;
    }

    let (_, response) = app.get(&format!("{}/stats", path)).await;
    assert!(common::parse(&response)["weekly_change"].is_null());
}

#[tokio::test]
async fn test_update_and_delete_weight_log() {
    let app = common::TestApp::new();
    let user = app.create_test_user().await;
    let path = format!("/api/v1/users/{}/weight", user.id);

    app.post(&path, &json!({ "weight_kg": 89.0, "logged_at": days_ago(1) }))
        .await;
    let (_, created) = app.post(&path, &json!({ "weight_kg": 88.0 })).await;
    let log_id = common::parse(&created)["id"].as_str().unwrap().to_string();

    let (status, response) = app
        .put(&format!("{}/{}", path, log_id), &json!({ "weight_kg": 87.5 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::parse(&response)["weight_kg"], 87.5);

    let (_, profile) = app.get(&format!("/api/v1/users/{}", user.id)).await;
    assert_eq!(common::parse(&profile)["current_weight"], 87.5);

    let (status, _) = app.delete(&format!("{}/{}", path, log_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, profile) = app.get(&format!("/api/v1/users/{}", user.id)).await;
    assert_eq!(common::parse(&profile)["current_weight"], 89.0);
}

#[tokio::test]
async fn test_weight_log_ownership() {
    let app = common::TestApp::new();
    let owner = app.create_test_user().await;
    let other = app.create_user(70.0, 65.0).await;

    let (_, created) = app
        .post(
            &format!("/api/v1/users/{}/weight", owner.id),
            &json!({ "weight_kg": 88.0 }),
        )
        .await;
    let log_id = common::parse(&created)["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .delete(&format!("/api/v1/users/{}/weight/{}", other.id, log_id))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
