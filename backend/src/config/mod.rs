//! Configuration management for the SlimSense backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: SLIMSENSE__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use slimsense_shared::stats::AnalyticsPolicy;
use slimsense_shared::trend::MAX_WINDOW_DAYS;
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub analytics: AnalyticsPolicy,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            analytics: AnalyticsPolicy::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with SLIMSENSE__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., SLIMSENSE__ANALYTICS__WEEKLY_WINDOW__TOLERANCE_DAYS=5
            .add_source(config::Environment::with_prefix("SLIMSENSE").separator("__"))
            .build()?;

        let loaded: AppConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject analytics windows that cannot match anything
    pub fn validate(&self) -> Result<()> {
        let policy = &self.analytics;
        for (name, window) in [
            ("weekly_window", policy.weekly_window),
            ("monthly_window", policy.monthly_window),
        ] {
            if window.lookback_days <= 0 || window.tolerance_days < 0 {
                anyhow::bail!(
                    "analytics.{} needs a positive lookback and non-negative tolerance",
                    name
                );
            }
            if window.lookback_days > MAX_WINDOW_DAYS || window.tolerance_days > MAX_WINDOW_DAYS {
                anyhow::bail!("analytics.{} may span at most {} days", name, MAX_WINDOW_DAYS);
            }
        }
        if policy.forecast_window_days <= 0 || policy.forecast_window_days > MAX_WINDOW_DAYS {
            anyhow::bail!(
                "analytics.forecast_window_days must be between 1 and {}",
                MAX_WINDOW_DAYS
            );
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
