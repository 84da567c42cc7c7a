//! Configuration management for the batch jobs
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: HD__)

use anyhow::Result;
use healthdash_calc::trends::{
    LoadBalanceOptions, DEFAULT_ATL_SPAN, DEFAULT_BASELINE_LOOKBACK_DAYS, DEFAULT_CTL_SPAN,
    DEFAULT_DELTA_WINDOW,
};
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

/// Job configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct JobsConfig {
    #[validate(nested)]
    pub recompute: RecomputeConfig,
    #[validate(nested)]
    pub trends: TrendConfig,
    pub input: InputConfig,
}

/// Nightly readiness recompute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct RecomputeConfig {
    /// Prior days averaged into each personal baseline
    #[validate(range(min = 1, max = 90))]
    pub lookback_days: usize,
    /// Only days this close to the newest row are rescored
    #[validate(range(min = 1, max = 366))]
    pub window_days: usize,
}

/// Dashboard load trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct TrendConfig {
    #[validate(range(min = 1, max = 365))]
    pub ctl_span: usize,
    #[validate(range(min = 1, max = 365))]
    pub atl_span: usize,
    #[validate(range(min = 1, max = 365))]
    pub delta_window: usize,
}

/// Input locations for the batch binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub daily_metrics_path: String,
}

impl Default for RecomputeConfig {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_BASELINE_LOOKBACK_DAYS,
            window_days: 30,
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            ctl_span: DEFAULT_CTL_SPAN,
            atl_span: DEFAULT_ATL_SPAN,
            delta_window: DEFAULT_DELTA_WINDOW,
        }
    }
}

impl TrendConfig {
    pub fn load_balance_options(&self) -> LoadBalanceOptions {
        LoadBalanceOptions {
            ctl_span: self.ctl_span,
            atl_span: self.atl_span,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            daily_metrics_path: "data/daily_metrics.csv".to_string(),
        }
    }
}

impl JobsConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with HD__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&JobsConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (HD__ prefix)
            // e.g., HD__TRENDS__CTL_SPAN=28 sets trends.ctl_span
            .add_source(config::Environment::with_prefix("HD").separator("__"))
            .build()?;

        let config: JobsConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
