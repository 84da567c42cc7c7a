//! Dashboard load trend

use crate::config::TrendConfig;
use crate::models::LoadTrend;
use chrono::NaiveDate;
use healthdash_calc::trends::{compute_chronic_acute_load, rolling_delta};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// Load trend service
pub struct TrendService;

impl TrendService {
    /// Build the CTL/ATL/TSB chart for `start..=end`
    ///
    /// Every calendar day gets an entry. Days with no load are `None`, not
    /// zero, so the EMAs carry forward across them.
    pub fn load_trend(
        user_id: Uuid,
        daily: &BTreeMap<NaiveDate, f64>,
        start: NaiveDate,
        end: NaiveDate,
        config: &TrendConfig,
    ) -> LoadTrend {
        let dates: Vec<NaiveDate> = start.iter_days().take_while(|day| *day <= end).collect();
        let daily_load: Vec<Option<f64>> = dates.iter().map(|day| daily.get(day).copied()).collect();

        let balance = compute_chronic_acute_load(&daily_load, config.load_balance_options());
        let load_delta = rolling_delta(&daily_load, config.delta_window);

        debug!(
            user_id = %user_id,
            days = dates.len(),
            ctl = balance.ctl,
            atl = balance.atl,
            tsb = balance.tsb,
            "Built load trend"
        );

        LoadTrend {
            user_id,
            dates,
            daily_load,
            balance,
            load_delta,
        }
    }
}
