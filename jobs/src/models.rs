//! Row types exchanged with the store and ingestion collaborators
//!
//! These mirror the `daily_metrics` and `activities` rows the jobs are fed.
//! Nothing here is persisted by this crate.

use chrono::{DateTime, NaiveDate, Utc};
use healthdash_calc::load::{HeartRateSample, LoadSource};
use healthdash_calc::tdee::{ActivityLevel, BiologicalSex, TdeeResult};
use healthdash_calc::trends::LoadBalanceResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-day of device metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub user_id: Uuid,
    pub metric_date: NaiveDate,
    #[serde(default)]
    pub sleep_minutes_total: Option<f64>,
    #[serde(default)]
    pub sleep_efficiency: Option<f64>,
    #[serde(default)]
    pub resting_hr: Option<f64>,
    #[serde(default)]
    pub hrv_rmssd: Option<f64>,
    #[serde(default)]
    pub training_load: Option<f64>,
}

/// One imported workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub user_id: Uuid,
    pub source_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub duration_s: Option<f64>,
    #[serde(default)]
    pub avg_hr: Option<f64>,
    /// Peak heart rate seen during the session
    #[serde(default)]
    pub max_hr: Option<f64>,
    /// Training Stress Score reported by the device, if any
    #[serde(default)]
    pub tss_est: Option<f64>,
    #[serde(default)]
    pub hr_stream: Option<Vec<HeartRateSample>>,
    #[serde(default)]
    pub sampling_interval_s: Option<f64>,
}

/// Athlete profile as entered on the goals screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub user_id: Uuid,
    pub sex: BiologicalSex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    #[serde(default)]
    pub resting_hr: Option<f64>,
    /// Measured max HR; age-predicted when absent
    #[serde(default)]
    pub max_hr: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub activity_multiplier: Option<f64>,
}

/// Nightly readiness output for one user-day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessRecord {
    pub user_id: Uuid,
    pub metric_date: NaiveDate,
    pub readiness_score: u8,
}

/// Training load of one imported workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLoad {
    pub user_id: Uuid,
    pub source_id: String,
    pub metric_date: NaiveDate,
    pub load: f64,
    pub source: LoadSource,
}

/// Dashboard load chart for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTrend {
    pub user_id: Uuid,
    /// One entry per calendar day, oldest first
    pub dates: Vec<NaiveDate>,
    pub daily_load: Vec<Option<f64>>,
    pub balance: LoadBalanceResult,
    pub load_delta: Vec<Option<f64>>,
}

/// Calorie targets for the goals screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyTargets {
    pub user_id: Uuid,
    pub tdee: TdeeResult,
}
