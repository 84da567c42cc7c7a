//! Daily readiness scoring
//!
//! Combines five recovery signals into one 0-100 score. Each signal is
//! compared with the athlete's personal baseline and squashed to `[0, 1]`
//! with a logistic curve, then the components are averaged by weight:
//!
//! | Component         | Weight | Comparison                         |
//! |-------------------|--------|------------------------------------|
//! | HRV (rMSSD)       | 0.30   | z-score, higher is better          |
//! | Resting HR        | 0.25   | z-score, lower is better           |
//! | Sleep duration    | 0.20   | ratio to baseline, sensitivity 4   |
//! | Sleep efficiency  | 0.15   | ratio to baseline, sensitivity 5   |
//! | Previous-day load | 0.10   | deviation above baseline penalized |
//!
//! A component whose value or baseline is missing scores a neutral 0.5, so a
//! day with no data at all lands at 50.

use crate::numeric::{clamp, finite, sigmoid};
use serde::{Deserialize, Serialize};

/// Sleep duration baseline (minutes) assumed when the caller has none
pub const DEFAULT_SLEEP_MINUTES_BASELINE: f64 = 7.0 * 60.0;

/// Sleep efficiency baseline (percent) assumed when the caller has none
pub const DEFAULT_SLEEP_EFFICIENCY_BASELINE: f64 = 85.0;

/// Score of a component that cannot be judged
pub const NEUTRAL_COMPONENT_SCORE: f64 = 0.5;

const MIN_STD_DEV: f64 = 1.0;
const DEFAULT_STD_DEV_FRACTION: f64 = 0.1;
const SLEEP_DURATION_SENSITIVITY: f64 = 4.0;
const SLEEP_EFFICIENCY_SENSITIVITY: f64 = 5.0;
const ABSOLUTE_LOAD_SCALE: f64 = 75.0;
const LOAD_BASELINE_FRACTION: f64 = 0.25;
const MIN_LOAD_SCALE: f64 = 5.0;

/// Component weights; scores are normalized by their sum
const HRV_WEIGHT: f64 = 0.30;
const RESTING_HR_WEIGHT: f64 = 0.25;
const SLEEP_DURATION_WEIGHT: f64 = 0.20;
const SLEEP_EFFICIENCY_WEIGHT: f64 = 0.15;
const LOAD_WEIGHT: f64 = 0.10;

/// Today's recovery signals paired with personal baselines
///
/// Every field is optional. Absence is a normal input, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessInput {
    pub hrv_rmssd: Option<f64>,
    pub hrv_baseline: Option<f64>,
    pub hrv_std_dev: Option<f64>,
    pub resting_hr: Option<f64>,
    pub resting_hr_baseline: Option<f64>,
    pub resting_hr_std_dev: Option<f64>,
    pub sleep_minutes: Option<f64>,
    /// Defaults to [`DEFAULT_SLEEP_MINUTES_BASELINE`]
    pub sleep_minutes_baseline: Option<f64>,
    pub sleep_efficiency: Option<f64>,
    /// Defaults to [`DEFAULT_SLEEP_EFFICIENCY_BASELINE`]
    pub sleep_efficiency_baseline: Option<f64>,
    pub previous_day_load: Option<f64>,
    pub load_baseline: Option<f64>,
}

/// Readiness signal identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessSignal {
    Hrv,
    RestingHr,
    SleepDuration,
    SleepEfficiency,
    PreviousDayLoad,
}

/// One weighted component of the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessComponent {
    pub signal: ReadinessSignal,
    pub weight: f64,
    /// Component score in `[0, 1]`
    pub score: f64,
}

/// Composite score together with the components that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessBreakdown {
    pub score: u8,
    pub components: Vec<ReadinessComponent>,
}

/// Calculate the 0-100 readiness score
pub fn calculate_readiness_score(input: &ReadinessInput) -> u8 {
    calculate_readiness_breakdown(input).score
}

/// Calculate the readiness score and keep the per-signal components
pub fn calculate_readiness_breakdown(input: &ReadinessInput) -> ReadinessBreakdown {
    let components = vec![
        ReadinessComponent {
            signal: ReadinessSignal::Hrv,
            weight: HRV_WEIGHT,
            score: z_score_component(input.hrv_rmssd, input.hrv_baseline, input.hrv_std_dev, true),
        },
        ReadinessComponent {
            signal: ReadinessSignal::RestingHr,
            weight: RESTING_HR_WEIGHT,
            score: z_score_component(
                input.resting_hr,
                input.resting_hr_baseline,
                input.resting_hr_std_dev,
                false,
            ),
        },
        ReadinessComponent {
            signal: ReadinessSignal::SleepDuration,
            weight: SLEEP_DURATION_WEIGHT,
            score: ratio_component(
                input.sleep_minutes,
                input
                    .sleep_minutes_baseline
                    .or(Some(DEFAULT_SLEEP_MINUTES_BASELINE)),
                SLEEP_DURATION_SENSITIVITY,
            ),
        },
        ReadinessComponent {
            signal: ReadinessSignal::SleepEfficiency,
            weight: SLEEP_EFFICIENCY_WEIGHT,
            score: ratio_component(
                input.sleep_efficiency,
                input
                    .sleep_efficiency_baseline
                    .or(Some(DEFAULT_SLEEP_EFFICIENCY_BASELINE)),
                SLEEP_EFFICIENCY_SENSITIVITY,
            ),
        },
        ReadinessComponent {
            signal: ReadinessSignal::PreviousDayLoad,
            weight: LOAD_WEIGHT,
            score: load_component(input.previous_day_load, input.load_baseline),
        },
    ];

    let score = composite_score(&components);
    ReadinessBreakdown { score, components }
}

/// Weighted mean of the components, scaled to 0-100
fn composite_score(components: &[ReadinessComponent]) -> u8 {
    let total_weight: f64 = components.iter().map(|c| c.weight).sum();
    let weighted = if total_weight > 0.0 {
        components.iter().map(|c| c.weight * c.score).sum::<f64>() / total_weight
    } else {
        0.0
    };

    (clamp(weighted, 0.0, 1.0) * 100.0).round() as u8
}

/// Standard deviation to normalize against when none is known
///
/// Falls back to 10% of the baseline, never below 1.
fn normalize_std_dev(std_dev: Option<f64>, baseline: f64) -> f64 {
    match finite(std_dev) {
        Some(sd) if sd > 0.0 => sd,
        _ => (baseline.abs() * DEFAULT_STD_DEV_FRACTION).max(MIN_STD_DEV),
    }
}

fn z_score_component(
    value: Option<f64>,
    baseline: Option<f64>,
    std_dev: Option<f64>,
    higher_is_better: bool,
) -> f64 {
    let (Some(value), Some(baseline)) = (finite(value), finite(baseline)) else {
        return NEUTRAL_COMPONENT_SCORE;
    };

    let z = (value - baseline) / normalize_std_dev(std_dev, baseline);
    let score = sigmoid(if higher_is_better { z } else { -z });
    clamp(score, 0.0, 1.0)
}

fn ratio_component(value: Option<f64>, baseline: Option<f64>, sensitivity: f64) -> f64 {
    let (Some(value), Some(baseline)) = (finite(value), finite(baseline)) else {
        return NEUTRAL_COMPONENT_SCORE;
    };
    if baseline <= 0.0 {
        return NEUTRAL_COMPONENT_SCORE;
    }

    let z = (value / baseline - 1.0) * sensitivity;
    clamp(sigmoid(z), 0.0, 1.0)
}

/// Heavier-than-usual training yesterday lowers readiness today
fn load_component(previous_day_load: Option<f64>, load_baseline: Option<f64>) -> f64 {
    let Some(load) = finite(previous_day_load) else {
        return NEUTRAL_COMPONENT_SCORE;
    };

    let score = match finite(load_baseline).filter(|b| *b > 0.0) {
        None => sigmoid(-load / ABSOLUTE_LOAD_SCALE),
        Some(baseline) => {
            let scale = (baseline * LOAD_BASELINE_FRACTION).max(MIN_LOAD_SCALE);
            sigmoid(-(load - baseline) / scale)
        }
    };
    clamp(score, 0.0, 1.0)
}
