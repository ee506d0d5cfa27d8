//! Weight log repository for store operations

use crate::db::Tables;
use anyhow::Result;
use chrono::{DateTime, Utc};
use slimsense_shared::models::WeightSample;
use uuid::Uuid;

/// Weight log record
#[derive(Debug, Clone, PartialEq)]
pub struct WeightLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WeightLogRecord {
    pub fn to_sample(&self) -> WeightSample {
        WeightSample {
            id: self.id,
            timestamp: self.logged_at,
            weight_kg: self.weight_kg,
            note: self.notes.clone(),
        }
    }

    fn sort_key(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.logged_at, self.created_at)
    }
}

/// Input for creating a weight log
#[derive(Debug, Clone)]
pub struct CreateWeightLog {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub logged_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Weight repository for store operations
pub struct WeightRepository;

impl WeightRepository {
    /// Create a new weight log entry
    pub fn create(tables: &mut Tables, input: CreateWeightLog) -> Result<WeightLogRecord> {
        if !tables.users.contains_key(&input.user_id) {
            anyhow::bail!("weight log references unknown user {}", input.user_id);
        }

        let record = WeightLogRecord {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            weight_kg: input.weight_kg,
            logged_at: input.logged_at,
            notes: input.notes,
            created_at: Utc::now(),
        };
        tables.weight_logs.insert(record.id, record.clone());
        Ok(record)
    }

    /// Get a weight log by ID
    pub fn get_by_id(tables: &Tables, id: Uuid) -> Option<WeightLogRecord> {
        tables.weight_logs.get(&id).cloned()
    }

    /// All of a user's logs, oldest first
    pub fn list_for_user(tables: &Tables, user_id: Uuid) -> Vec<WeightLogRecord> {
        let mut logs: Vec<WeightLogRecord> = tables
            .weight_logs
            .values()
            .filter(|log| log.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by_key(WeightLogRecord::sort_key);
        logs
    }

    /// Logs within `[start, end]`, oldest first, keeping the `limit` most recent
    pub fn get_by_date_range(
        tables: &Tables,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<WeightLogRecord> {
        let mut logs: Vec<WeightLogRecord> = Self::list_for_user(tables, user_id)
            .into_iter()
            .filter(|log| start.map_or(true, |s| log.logged_at >= s))
            .filter(|log| end.map_or(true, |e| log.logged_at <= e))
            .collect();

        if logs.len() > limit {
            logs.drain(..logs.len() - limit);
        }
        logs
    }

    /// Get the most recent weight log for a user
    pub fn get_latest(tables: &Tables, user_id: Uuid) -> Option<WeightLogRecord> {
        tables
            .weight_logs
            .values()
            .filter(|log| log.user_id == user_id)
            .max_by_key(|log| log.sort_key())
            .cloned()
    }

    /// Edit weight and/or notes of a log
    pub fn update(
        tables: &mut Tables,
        id: Uuid,
        weight_kg: Option<f64>,
        notes: Option<String>,
    ) -> Result<WeightLogRecord> {
        let Some(log) = tables.weight_logs.get_mut(&id) else {
            anyhow::bail!("weight log {} vanished during update", id);
        };
        if let Some(w) = weight_kg {
            log.weight_kg = w;
        }
        if let Some(n) = notes {
            log.notes = Some(n);
        }
        Ok(log.clone())
    }

    /// Delete a weight log, returning it if it existed
    pub fn delete(tables: &mut Tables, id: Uuid) -> Option<WeightLogRecord> {
        tables.weight_logs.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{CreateUser, UserRepository};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use slimsense_shared::health_metrics::{ActivityLevel, Gender};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap()
    }

    fn setup() -> (Tables, Uuid) {
        let mut tables = Tables::default();
        let user = UserRepository::create(
            &mut tables,
            CreateUser {
                email: "w@example.com".to_string(),
                full_name: "Weigher".to_string(),
                gender: Gender::Male,
                age: 45,
                height_cm: 178.0,
                activity_level: ActivityLevel::ModeratelyActive,
                current_weight: 90.0,
                target_weight: 80.0,
                target_date: None,
                dietary_preferences: vec![],
                bmi: None,
                goal: None,
            },
        )
        .unwrap();
        (tables, user.id)
    }

    fn log(tables: &mut Tables, user_id: Uuid, day: i64, weight: f64) -> WeightLogRecord {
        WeightRepository::create(
            tables,
            CreateWeightLog {
                user_id,
                weight_kg: weight,
                logged_at: base() + Duration::days(day),
                notes: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_requires_known_user() {
        let mut tables = Tables::default();
        let result = WeightRepository::create(
            &mut tables,
            CreateWeightLog {
                user_id: Uuid::new_v4(),
                weight_kg: 70.0,
                logged_at: base(),
                notes: None,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_list_is_chronological() {
        let (mut tables, user_id) = setup();
        log(&mut tables, user_id, 5, 88.0);
        log(&mut tables, user_id, 0, 90.0);
        log(&mut tables, user_id, 2, 89.0);

        let weights: Vec<f64> = WeightRepository::list_for_user(&tables, user_id)
            .iter()
            .map(|l| l.weight_kg)
            .collect();
        assert_eq!(weights, vec![90.0, 89.0, 88.0]);
        assert_eq!(WeightRepository::get_latest(&tables, user_id).unwrap().weight_kg, 88.0);
    }

    #[test]
    fn test_range_keeps_most_recent_within_limit() {
        let (mut tables, user_id) = setup();
        for day in 0..10 {
            log(&mut tables, user_id, day, 90.0 - day as f64 * 0.1);
        }

        let logs = WeightRepository::get_by_date_range(
            &tables,
            user_id,
            Some(base() + Duration::days(2)),
            Some(base() + Duration::days(8)),
            3,
        );
        let days: Vec<i64> = logs.iter().map(|l| (l.logged_at - base()).num_days()).collect();
        assert_eq!(days, vec![6, 7, 8]);
    }

    #[test]
    fn test_update_and_delete() {
        let (mut tables, user_id) = setup();
        let entry = log(&mut tables, user_id, 0, 90.0);

        let updated =
            WeightRepository::update(&mut tables, entry.id, Some(89.4), Some("typo".into())).unwrap();
        assert_eq!(updated.weight_kg, 89.4);
        assert_eq!(updated.notes.as_deref(), Some("typo"));

        assert!(WeightRepository::delete(&mut tables, entry.id).is_some());
        assert!(WeightRepository::get_by_id(&tables, entry.id).is_none());
        assert!(WeightRepository::get_latest(&tables, user_id).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_range_is_most_recent_suffix(
            days in prop::collection::vec(0i64..60, 0..30),
            limit in 1usize..20,
        ) {
            let (mut tables, user_id) = setup();
            for day in &days {
                log(&mut tables, user_id, *day, 80.0);
            }

            let all = WeightRepository::list_for_user(&tables, user_id);
            let limited = WeightRepository::get_by_date_range(&tables, user_id, None, None, limit);

            prop_assert_eq!(limited.len(), days.len().min(limit));
            prop_assert!(limited.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
            prop_assert_eq!(&all[all.len() - limited.len()..], &limited[..]);
        }
    }
}
