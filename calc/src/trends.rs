//! Time-series trend utilities
//!
//! Exponential smoothing, fixed-lag deltas, trailing baselines, and the
//! Performance Management Chart built on top of them:
//!
//! - CTL (Chronic Training Load): EMA of daily load over 42 days, "fitness"
//! - ATL (Acute Training Load): EMA of daily load over 7 days, "fatigue"
//! - TSB (Training Stress Balance): CTL - ATL, "form"
//!
//! Series are one entry per calendar day, oldest first. Missing days are
//! `None` entries rather than omitted, so index arithmetic stays calendar
//! arithmetic.

use crate::numeric::finite;
use serde::{Deserialize, Serialize};

/// Default EMA span (days)
pub const DEFAULT_EMA_SPAN: usize = 7;

/// Default lag for [`rolling_delta`] (days)
pub const DEFAULT_DELTA_WINDOW: usize = 7;

/// Days of history averaged into a personal baseline
pub const DEFAULT_BASELINE_LOOKBACK_DAYS: usize = 14;

/// Standard CTL span - 42 days for long-term fitness
pub const DEFAULT_CTL_SPAN: usize = 42;

/// Standard ATL span - 7 days for short-term fatigue
pub const DEFAULT_ATL_SPAN: usize = 7;

// ============================================================================
// Smoothing and Deltas
// ============================================================================

/// Exponential moving average with `alpha = 2 / (span + 1)`
///
/// The first entry seeds the average (0 when it is missing). A missing entry
/// carries the previous average forward instead of pulling it toward zero.
/// A span of 0 is treated as 1, which reproduces the input.
pub fn exponential_moving_average(values: &[Option<f64>], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut ema: Vec<f64> = Vec::with_capacity(values.len());

    for value in values.iter().copied().map(finite) {
        let next = match (ema.last().copied(), value) {
            (None, Some(value)) => value,
            (None, None) => 0.0,
            (Some(previous), Some(value)) => alpha * value + (1.0 - alpha) * previous,
            (Some(previous), None) => previous,
        };
        ema.push(next);
    }

    ema
}

/// Change of each entry against the entry `window` days earlier
///
/// `None` for the first `window` entries and wherever either end is missing.
pub fn rolling_delta(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|index| {
            let lookback = index.checked_sub(window)?;
            let current = finite(values[index])?;
            let prior = finite(values[lookback])?;
            Some(current - prior)
        })
        .collect()
}

/// Mean of the finite entries in the `lookback` days before `index`
///
/// The entry at `index` itself is excluded. `None` when that window holds
/// no usable value.
pub fn trailing_mean(values: &[Option<f64>], index: usize, lookback: usize) -> Option<f64> {
    let end = index.min(values.len());
    let start = end.saturating_sub(lookback);

    let (sum, count) = values[start..end]
        .iter()
        .copied()
        .filter_map(finite)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

// ============================================================================
// Chronic / Acute Load Balance
// ============================================================================

/// Spans for the load balance EMAs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalanceOptions {
    pub ctl_span: usize,
    pub atl_span: usize,
}

impl Default for LoadBalanceOptions {
    fn default() -> Self {
        Self {
            ctl_span: DEFAULT_CTL_SPAN,
            atl_span: DEFAULT_ATL_SPAN,
        }
    }
}

/// Chronic and acute load with their full daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalanceResult {
    /// Chronic Training Load at the end of the series
    pub ctl: f64,
    /// Acute Training Load at the end of the series
    pub atl: f64,
    /// Training Stress Balance, always `ctl - atl`
    pub tsb: f64,
    pub ctl_series: Vec<f64>,
    pub atl_series: Vec<f64>,
}

/// Derive CTL, ATL and TSB from a daily load series
pub fn compute_chronic_acute_load(
    loads: &[Option<f64>],
    options: LoadBalanceOptions,
) -> LoadBalanceResult {
    let ctl_series = exponential_moving_average(loads, options.ctl_span);
    let atl_series = exponential_moving_average(loads, options.atl_span);
    let ctl = last_finite(&ctl_series).unwrap_or(0.0);
    let atl = last_finite(&atl_series).unwrap_or(0.0);

    LoadBalanceResult {
        ctl,
        atl,
        tsb: ctl - atl,
        ctl_series,
        atl_series,
    }
}

fn last_finite(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn series(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    // =========================================================================
    // EMA Tests
    // =========================================================================

    #[test]
    fn test_ema_known_values() {
        let ema = exponential_moving_average(&series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(ema, vec![1.0, 1.5, 2.25, 3.125, 4.0625]);
    }

    #[test]
    fn test_ema_carries_forward_missing_days() {
        let ema = exponential_moving_average(&[Some(4.0), None, Some(f64::NAN), Some(8.0)], 3);
        assert_eq!(ema, vec![4.0, 4.0, 4.0, 6.0]);
    }

    #[test]
    fn test_ema_missing_seed_starts_at_zero() {
        let ema = exponential_moving_average(&[None, Some(10.0)], 3);
        assert_eq!(ema, vec![0.0, 5.0]);
    }

    #[test]
    fn test_ema_empty() {
        assert!(exponential_moving_average(&[], DEFAULT_EMA_SPAN).is_empty());
    }

    #[test]
    fn test_ema_zero_span_follows_input() {
        let ema = exponential_moving_average(&series(&[3.0, 9.0, 1.0]), 0);
        assert_eq!(ema, vec![3.0, 9.0, 1.0]);
    }

    // =========================================================================
    // Rolling Delta Tests
    // =========================================================================

    #[test]
    fn test_rolling_delta_window() {
        let delta = rolling_delta(&series(&[2.0, 4.0, 6.0, 9.0, 11.0]), 2);
        assert_eq!(delta, vec![None, None, Some(4.0), Some(5.0), Some(5.0)]);
    }

    #[rstest]
    #[case::missing_current(vec![Some(1.0), Some(2.0), None], vec![None, Some(1.0), None])]
    #[case::missing_prior(vec![None, Some(2.0), Some(5.0)], vec![None, None, Some(3.0)])]
    #[case::non_finite(vec![Some(1.0), Some(f64::INFINITY), Some(3.0)], vec![None, None, None])]
    fn test_rolling_delta_gaps(#[case] values: Vec<Option<f64>>, #[case] expected: Vec<Option<f64>>) {
        assert_eq!(rolling_delta(&values, 1), expected);
    }

    #[test]
    fn test_rolling_delta_window_longer_than_series() {
        assert_eq!(rolling_delta(&series(&[1.0, 2.0]), 7), vec![None, None]);
    }

    // =========================================================================
    // Trailing Mean Tests
    // =========================================================================

    #[test]
    fn test_trailing_mean_excludes_current_day() {
        let values = series(&[10.0, 20.0, 30.0, 1000.0]);
        assert_eq!(trailing_mean(&values, 3, 14), Some(20.0));
        assert_eq!(trailing_mean(&values, 3, 2), Some(25.0));
    }

    #[test]
    fn test_trailing_mean_skips_missing() {
        let values = vec![Some(10.0), None, Some(f64::NAN), Some(30.0), Some(5.0)];
        assert_eq!(trailing_mean(&values, 4, 14), Some(20.0));
    }

    #[test]
    fn test_trailing_mean_without_history() {
        let values = vec![None, Some(7.0)];
        assert_eq!(trailing_mean(&values, 0, 14), None);
        assert_eq!(trailing_mean(&values, 1, 14), None);
        assert_eq!(trailing_mean(&values, 5, 0), None);
    }

    // =========================================================================
    // Load Balance Tests
    // =========================================================================

    #[test]
    fn test_chronic_acute_load() {
        let loads = series(&[50.0, 60.0, 65.0, 70.0, 68.0, 72.0, 75.0, 74.0, 76.0]);
        let result = compute_chronic_acute_load(&loads, LoadBalanceOptions::default());

        assert!(result.ctl > 50.0);
        assert!(result.atl > result.ctl - 15.0);
        assert_eq!(result.tsb, result.ctl - result.atl);
        assert_eq!(result.ctl_series.len(), loads.len());
        assert_eq!(result.atl_series.len(), loads.len());
    }

    #[test]
    fn test_chronic_acute_load_empty() {
        let result = compute_chronic_acute_load(&[], LoadBalanceOptions::default());
        assert_eq!((result.ctl, result.atl, result.tsb), (0.0, 0.0, 0.0));
        assert!(result.ctl_series.is_empty());
    }

    #[test]
    fn test_acute_reacts_faster_than_chronic() {
        let mut loads = vec![Some(40.0); 30];
        loads.extend(vec![Some(120.0); 5]);
        let result = compute_chronic_acute_load(&loads, LoadBalanceOptions::default());
        assert!(result.atl > result.ctl);
        assert!(result.tsb < 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: TSB is exactly CTL - ATL
        #[test]
        fn prop_tsb_identity(
            loads in prop::collection::vec(proptest::option::of(0.0f64..400.0), 0..120),
            ctl_span in 1usize..60,
            atl_span in 1usize..14
        ) {
            let result = compute_chronic_acute_load(&loads, LoadBalanceOptions { ctl_span, atl_span });
            prop_assert_eq!(result.tsb, result.ctl - result.atl);
        }

        /// Property: EMA output has the input's length and stays within its range
        #[test]
        fn prop_ema_bounded_by_inputs(
            values in prop::collection::vec(1.0f64..500.0, 1..100),
            span in 1usize..50
        ) {
            let ema = exponential_moving_average(&series(&values), span);
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(ema.len(), values.len());
            for v in ema {
                prop_assert!(v >= min - 1e-9 && v <= max + 1e-9);
            }
        }

        /// Property: repeated calls are bit-identical
        #[test]
        fn prop_trends_idempotent(
            loads in prop::collection::vec(proptest::option::of(0.0f64..400.0), 0..60),
            window in 0usize..10
        ) {
            let first = compute_chronic_acute_load(&loads, LoadBalanceOptions::default());
            let second = compute_chronic_acute_load(&loads, LoadBalanceOptions::default());
            prop_assert_eq!(first.tsb.to_bits(), second.tsb.to_bits());
            prop_assert_eq!(first.ctl_series, second.ctl_series);
            prop_assert_eq!(rolling_delta(&loads, window), rolling_delta(&loads, window));
        }
    }
}
