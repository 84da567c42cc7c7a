//! Nightly readiness recompute
//!
//! For each user, orders the daily metric rows by date and scores every day
//! in the recompute window against a trailing personal baseline:
//! - HRV, resting HR, sleep and training load baselines are the mean of the
//!   prior `lookback_days` rows
//! - previous-day load is yesterday's row, when yesterday has a row
//! - implausible readings are dropped before they reach any baseline

use crate::config::RecomputeConfig;
use crate::error::JobError;
use crate::models::{DailyMetric, ReadinessRecord};
use chrono::{Days, NaiveDate};
use healthdash_calc::readiness::{calculate_readiness_score, ReadinessInput};
use healthdash_calc::trends::trailing_mean;
use healthdash_calc::validation::{
    plausible, validate_heart_rate, validate_hrv, validate_percentage, validate_sleep_minutes,
    validate_training_load,
};
use std::collections::BTreeMap;
use tokio::task::JoinSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Readiness recompute service
pub struct RecomputeService;

/// One user's signals as aligned columns, oldest first
struct SignalColumns {
    dates: Vec<NaiveDate>,
    hrv: Vec<Option<f64>>,
    resting_hr: Vec<Option<f64>>,
    sleep_minutes: Vec<Option<f64>>,
    sleep_efficiency: Vec<Option<f64>>,
    training_load: Vec<Option<f64>>,
}

impl SignalColumns {
    fn from_rows(rows: &[DailyMetric]) -> Self {
        Self {
            dates: rows.iter().map(|m| m.metric_date).collect(),
            hrv: rows.iter().map(|m| plausible(m.hrv_rmssd, validate_hrv)).collect(),
            resting_hr: rows
                .iter()
                .map(|m| plausible(m.resting_hr, validate_heart_rate))
                .collect(),
            sleep_minutes: rows
                .iter()
                .map(|m| plausible(m.sleep_minutes_total, validate_sleep_minutes))
                .collect(),
            sleep_efficiency: rows
                .iter()
                .map(|m| plausible(m.sleep_efficiency, validate_percentage))
                .collect(),
            training_load: rows
                .iter()
                .map(|m| plausible(m.training_load, validate_training_load))
                .collect(),
        }
    }

    /// Yesterday's load, only if yesterday is the previous row
    fn previous_day_load(&self, index: usize) -> Option<f64> {
        let prev = index.checked_sub(1)?;
        if self.dates[prev].succ_opt() != Some(self.dates[index]) {
            return None;
        }
        self.training_load[prev]
    }

    fn readiness_input(&self, index: usize, lookback: usize) -> ReadinessInput {
        ReadinessInput {
            hrv_rmssd: self.hrv[index],
            hrv_baseline: trailing_mean(&self.hrv, index, lookback),
            hrv_std_dev: None,
            resting_hr: self.resting_hr[index],
            resting_hr_baseline: trailing_mean(&self.resting_hr, index, lookback),
            resting_hr_std_dev: None,
            sleep_minutes: self.sleep_minutes[index],
            sleep_minutes_baseline: trailing_mean(&self.sleep_minutes, index, lookback),
            sleep_efficiency: self.sleep_efficiency[index],
            sleep_efficiency_baseline: trailing_mean(&self.sleep_efficiency, index, lookback),
            previous_day_load: self.previous_day_load(index),
            load_baseline: trailing_mean(&self.training_load, index, lookback),
        }
    }
}

impl RecomputeService {
    /// Score every user-day in the recompute window
    ///
    /// Output is ordered by user, then date.
    pub fn recompute_readiness(
        rows: &[DailyMetric],
        config: &RecomputeConfig,
    ) -> Vec<ReadinessRecord> {
        let records: Vec<ReadinessRecord> = group_by_user(rows)
            .into_iter()
            .flat_map(|(user_id, days)| Self::score_user(user_id, days, config))
            .collect();

        info!(rows = rows.len(), scored = records.len(), "Readiness recompute finished");
        records
    }

    /// Score a single calendar day for every user that has a row on it
    pub fn recompute_day(
        rows: &[DailyMetric],
        date: NaiveDate,
        config: &RecomputeConfig,
    ) -> Vec<ReadinessRecord> {
        Self::recompute_readiness(rows, config)
            .into_iter()
            .filter(|record| record.metric_date == date)
            .collect()
    }

    /// Same as [`Self::recompute_readiness`], one blocking task per user
    pub async fn recompute_all(
        rows: Vec<DailyMetric>,
        config: RecomputeConfig,
    ) -> Result<Vec<ReadinessRecord>, JobError> {
        let mut tasks = JoinSet::new();
        for (user_id, days) in group_by_user(&rows) {
            tasks.spawn_blocking(move || Self::score_user(user_id, days, &config));
        }

        let mut records = Vec::with_capacity(rows.len());
        while let Some(scored) = tasks.join_next().await {
            records.extend(scored?);
        }
        records.sort_by(|a, b| (a.user_id, a.metric_date).cmp(&(b.user_id, b.metric_date)));

        info!(rows = rows.len(), scored = records.len(), "Readiness recompute finished");
        Ok(records)
    }

    fn score_user(
        user_id: Uuid,
        mut days: Vec<DailyMetric>,
        config: &RecomputeConfig,
    ) -> Vec<ReadinessRecord> {
        // Stable sort: on duplicate dates the first row supplied wins
        days.sort_by_key(|m| m.metric_date);
        days.dedup_by_key(|m| m.metric_date);

        let Some(newest) = days.last().map(|m| m.metric_date) else {
            return Vec::new();
        };
        let cutoff = newest.checked_sub_days(Days::new(config.window_days as u64));

        let columns = SignalColumns::from_rows(&days);
        let records: Vec<ReadinessRecord> = columns
            .dates
            .iter()
            .enumerate()
            .filter(|(_, date)| cutoff.map_or(true, |cutoff| **date > cutoff))
            .map(|(index, date)| ReadinessRecord {
                user_id,
                metric_date: *date,
                readiness_score: calculate_readiness_score(
                    &columns.readiness_input(index, config.lookback_days),
                ),
            })
            .collect();

        debug!(
            user_id = %user_id,
            rows = days.len(),
            scored = records.len(),
            "Recomputed readiness"
        );
        metrics::counter!("healthdash_readiness_scored_total").increment(records.len() as u64);

        records
    }
}

/// Partition rows by user, keeping each user's rows in input order
fn group_by_user(rows: &[DailyMetric]) -> BTreeMap<Uuid, Vec<DailyMetric>> {
    let mut grouped: BTreeMap<Uuid, Vec<DailyMetric>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.user_id).or_default().push(row.clone());
    }
    grouped
}
