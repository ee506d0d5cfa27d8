//! In-memory document store
//!
//! Holds the users, weight logs and food logs tables behind a single
//! async `RwLock`. Every read-modify-write on a user (insert a sample and
//! resync the profile, for example) happens under one write guard, so
//! concurrent requests for the same user never interleave.

use crate::repositories::{FoodLogRecord, UserRecord, WeightLogRecord};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;
use uuid::Uuid;

/// How long the readiness probe waits for the store lock
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// The store's tables, keyed by record id
#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<Uuid, UserRecord>,
    pub weight_logs: HashMap<Uuid, WeightLogRecord>,
    pub food_logs: HashMap<Uuid, FoodLogRecord>,
}

/// Shared handle to the document store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire shared read access
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquire exclusive access for a read-modify-write
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

/// Check store health
pub async fn health_check(store: &Store) -> Result<()> {
    match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, store.read()).await {
        Ok(_) => Ok(()),
        Err(_) => {
            warn!("Store health check timed out waiting for lock");
            anyhow::bail!("store lock not acquired within {:?}", HEALTH_CHECK_TIMEOUT)
        }
    }
}
