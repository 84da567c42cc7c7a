//! Nutrition target compliance
//!
//! Ratios of logged intake to daily targets, capped at 150% so one huge
//! entry does not dominate a chart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of any compliance ratio
pub const MAX_COMPLIANCE_RATIO: f64 = 1.5;

/// Daily fiber goal (grams) when the target does not set one
pub const DEFAULT_FIBER_TARGET_G: f64 = 25.0;

/// Daily macro targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: Option<f64>,
}

/// Logged intake for a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroActual {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
}

/// Intake as a fraction of target, each in `[0, 1.5]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroCompliance {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Compare a day's intake with its macro targets
pub fn macro_compliance(actual: &MacroActual, target: &MacroTarget) -> MacroCompliance {
    MacroCompliance {
        calories: compliance_ratio(actual.calories, target.calories),
        protein: compliance_ratio(actual.protein, target.protein),
        carbs: compliance_ratio(actual.carbs, target.carbs),
        fat: compliance_ratio(actual.fat, target.fat),
        fiber: compliance_ratio(actual.fiber, target.fiber.unwrap_or(DEFAULT_FIBER_TARGET_G)),
    }
}

/// Coverage of every nutrient named in `target`
///
/// Nutrients logged but not targeted are ignored.
pub fn micronutrient_coverage(
    actual: &BTreeMap<String, Option<f64>>,
    target: &BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    target
        .iter()
        .map(|(nutrient, goal)| {
            let logged = actual.get(nutrient).copied().flatten();
            (nutrient.clone(), compliance_ratio(logged, *goal))
        })
        .collect()
}

/// `min(1.5, value / goal)`, or 0 when either side is missing or zero
fn compliance_ratio(value: Option<f64>, goal: f64) -> f64 {
    match value {
        Some(value) if value != 0.0 && goal != 0.0 => {
            let ratio = value / goal;
            if ratio.is_nan() {
                0.0
            } else {
                ratio.min(MAX_COMPLIANCE_RATIO)
            }
        }
        _ => 0.0,
    }
}
