//! User repository for store operations

use crate::db::Tables;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use slimsense_shared::health_metrics::{ActivityLevel, BmiCategory, Gender};
use slimsense_shared::models::{BodyProfile, NutritionGoal};
use slimsense_shared::nutrition::StoredGoals;
use uuid::Uuid;

/// User record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub age: i32,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub current_weight: f64,
    pub starting_weight: Option<f64>,
    pub target_weight: f64,
    pub target_date: Option<NaiveDate>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fat_goal: Option<i32>,
    pub dietary_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// The engine's view of this user
    pub fn body_profile(&self) -> BodyProfile {
        BodyProfile {
            gender: self.gender,
            age_years: self.age,
            height_cm: self.height_cm,
            activity_level: self.activity_level,
            current_weight_kg: self.current_weight,
            starting_weight_kg: self.starting_weight,
            target_weight_kg: self.target_weight,
            target_date: self.target_date,
            bmi: self.bmi,
            bmi_category: self.bmi_category,
        }
    }

    pub fn stored_goals(&self) -> StoredGoals {
        StoredGoals {
            calorie_goal: self.calorie_goal,
            protein_goal: self.protein_goal,
            carbs_goal: self.carbs_goal,
            fat_goal: self.fat_goal,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub age: i32,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub current_weight: f64,
    pub target_weight: f64,
    pub target_date: Option<NaiveDate>,
    pub dietary_preferences: Vec<String>,
    pub bmi: Option<(f64, BmiCategory)>,
    pub goal: Option<NutritionGoal>,
}

/// Partial update of a user; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub current_weight: Option<f64>,
    pub starting_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub dietary_preferences: Option<Vec<String>>,
    pub bmi: Option<(f64, BmiCategory)>,
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<i32>,
    pub carbs_goal: Option<i32>,
    pub fat_goal: Option<i32>,
}

impl UpdateUser {
    /// Goal fields from a computed nutrition goal
    pub fn with_goal(mut self, goal: &NutritionGoal) -> Self {
        self.calorie_goal = Some(goal.calorie_goal);
        self.protein_goal = Some(goal.protein_goal_g);
        self.carbs_goal = Some(goal.carbs_goal_g);
        self.fat_goal = Some(goal.fat_goal_g);
        self
    }
}

/// User repository for store operations
pub struct UserRepository;

impl UserRepository {
    /// Insert a new user; the caller checks email uniqueness first
    pub fn create(tables: &mut Tables, input: CreateUser) -> Result<UserRecord> {
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: input.email,
            full_name: input.full_name,
            gender: input.gender,
            age: input.age,
            height_cm: input.height_cm,
            activity_level: input.activity_level,
            current_weight: input.current_weight,
            starting_weight: Some(input.current_weight),
            target_weight: input.target_weight,
            target_date: input.target_date,
            bmi: input.bmi.map(|(bmi, _)| bmi),
            bmi_category: input.bmi.map(|(_, category)| category),
            calorie_goal: input.goal.map(|g| g.calorie_goal),
            protein_goal: input.goal.map(|g| g.protein_goal_g),
            carbs_goal: input.goal.map(|g| g.carbs_goal_g),
            fat_goal: input.goal.map(|g| g.fat_goal_g),
            dietary_preferences: input.dietary_preferences,
            created_at: now,
            updated_at: now,
        };

        if Self::find_by_email(tables, &record.email).is_some() {
            anyhow::bail!("duplicate email on insert");
        }
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }

    /// Find user by ID
    pub fn find_by_id(tables: &Tables, id: Uuid) -> Option<UserRecord> {
        tables.users.get(&id).cloned()
    }

    /// Find user by email, case-insensitively
    pub fn find_by_email(tables: &Tables, email: &str) -> Option<UserRecord> {
        tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    /// Apply a partial update
    pub fn update(tables: &mut Tables, id: Uuid, updates: UpdateUser) -> Result<UserRecord> {
        let Some(user) = tables.users.get_mut(&id) else {
            anyhow::bail!("user {} vanished during update", id);
        };

        if let Some(v) = updates.full_name {
            user.full_name = v;
        }
        if let Some(v) = updates.gender {
            user.gender = v;
        }
        if let Some(v) = updates.age {
            user.age = v;
        }
        if let Some(v) = updates.height_cm {
            user.height_cm = v;
        }
        if let Some(v) = updates.activity_level {
            user.activity_level = v;
        }
        if let Some(v) = updates.current_weight {
            user.current_weight = v;
        }
        if let Some(v) = updates.starting_weight {
            user.starting_weight = Some(v);
        }
        if let Some(v) = updates.target_weight {
            user.target_weight = v;
        }
        if let Some(v) = updates.target_date {
            user.target_date = Some(v);
        }
        if let Some(v) = updates.dietary_preferences {
            user.dietary_preferences = v;
        }
        if let Some((bmi, category)) = updates.bmi {
            user.bmi = Some(bmi);
            user.bmi_category = Some(category);
        }
        if let Some(v) = updates.calorie_goal {
            user.calorie_goal = Some(v);
        }
        if let Some(v) = updates.protein_goal {
            user.protein_goal = Some(v);
        }
        if let Some(v) = updates.carbs_goal {
            user.carbs_goal = Some(v);
        }
        if let Some(v) = updates.fat_goal {
            user.fat_goal = Some(v);
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    /// Delete a user together with all of their logs
    pub fn delete(tables: &mut Tables, id: Uuid) -> bool {
        if tables.users.remove(&id).is_none() {
            return false;
        }
        tables.weight_logs.retain(|_, log| log.user_id != id);
        tables.food_logs.retain(|_, log| log.user_id != id);
        true
    }
}
