//! Application state management
//!
//! Shared state passed to all request handlers via Axum's state
//! extraction. Every field is an `Arc` or a handle that clones cheaply.

use crate::config::AppConfig;
use crate::db::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use slimsense_shared::stats::AnalyticsPolicy;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store
    pub store: Store,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prometheus render handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle installed at startup
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Analytics windows for statistics
    #[inline]
    pub fn analytics(&self) -> &AnalyticsPolicy {
        &self.config.analytics
    }
}
