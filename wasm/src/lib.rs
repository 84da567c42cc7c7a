//! Health Dashboard WASM Module
//!
//! This crate provides WebAssembly bindings so the dashboard can redraw
//! trend charts and what-if targets in the browser without a round trip.
//!
//! JavaScript numbers have no `Option`, so a missing day is passed as `NaN`
//! and comes back as `NaN`. Structured inputs travel as JSON strings.

use healthdash_calc::load::{
    calculate_session_load, calculate_trimp_from_summary, SessionLoadInput, TrimpSummaryInput,
    FEMALE_TRIMP_COEFFICIENT,
};
use healthdash_calc::nutrition::{self, MacroActual, MacroTarget};
use healthdash_calc::readiness::{calculate_readiness_breakdown, ReadinessInput};
use healthdash_calc::tdee::{self, ActivityLevel, BiologicalSex, TdeeInput};
use healthdash_calc::trends::{self, LoadBalanceOptions};
use wasm_bindgen::prelude::*;

fn from_js(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| (!v.is_nan()).then_some(*v)).collect()
}

fn to_js(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ============================================================================
// Trends
// ============================================================================

/// Exponential moving average; `NaN` days carry the average forward
#[wasm_bindgen]
pub fn exponential_moving_average(values: &[f64], span: usize) -> Vec<f64> {
    trends::exponential_moving_average(&from_js(values), span)
}

/// Change against `window` days earlier, `NaN` where undefined
#[wasm_bindgen]
pub fn rolling_delta(values: &[f64], window: usize) -> Vec<f64> {
    to_js(&trends::rolling_delta(&from_js(values), window))
}

/// Final `[ctl, atl, tsb]` of a daily load series
#[wasm_bindgen]
pub fn chronic_acute_load(values: &[f64], ctl_span: usize, atl_span: usize) -> Vec<f64> {
    let balance = trends::compute_chronic_acute_load(
        &from_js(values),
        LoadBalanceOptions { ctl_span, atl_span },
    );
    vec![balance.ctl, balance.atl, balance.tsb]
}

// ============================================================================
// Session Load and Readiness
// ============================================================================

/// Banister TRIMP for a session summary
#[wasm_bindgen]
pub fn trimp_from_summary(
    duration_minutes: f64,
    avg_hr: f64,
    resting_hr: f64,
    max_hr: f64,
    is_female: bool,
) -> f64 {
    calculate_trimp_from_summary(&TrimpSummaryInput {
        duration_minutes,
        avg_hr,
        resting_hr,
        max_hr,
        coefficient: is_female.then_some(FEMALE_TRIMP_COEFFICIENT),
    })
}

fn session_load_from_json(input_json: &str) -> Result<String, String> {
    let input: SessionLoadInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid session: {}", e))?;
    serde_json::to_string(&calculate_session_load(&input)).map_err(|e| e.to_string())
}

/// Session load from a JSON `SessionLoadInput`, as JSON `{load, source}`
#[wasm_bindgen]
pub fn session_load(input_json: &str) -> Result<String, JsValue> {
    session_load_from_json(input_json).map_err(js_error)
}

fn readiness_from_json(input_json: &str) -> Result<String, String> {
    let input: ReadinessInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid readiness input: {}", e))?;
    serde_json::to_string(&calculate_readiness_breakdown(&input)).map_err(|e| e.to_string())
}

/// Readiness score with per-signal breakdown, as JSON
#[wasm_bindgen]
pub fn readiness_breakdown(input_json: &str) -> Result<String, JsValue> {
    readiness_from_json(input_json).map_err(js_error)
}

// ============================================================================
// Energy and Nutrition
// ============================================================================

fn tdee_breakdown(
    sex: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    activity_level: &str,
    activity_multiplier: f64,
) -> Result<Vec<f64>, String> {
    let sex: BiologicalSex = sex.parse()?;
    let activity_level = if activity_level.is_empty() {
        None
    } else {
        Some(activity_level.parse::<ActivityLevel>()?)
    };

    let result = tdee::total_daily_energy_expenditure(&TdeeInput {
        sex,
        weight_kg,
        height_cm,
        age_years,
        activity_level,
        activity_multiplier: (!activity_multiplier.is_nan()).then_some(activity_multiplier),
    });

    Ok(vec![
        result.bmr,
        result.multiplier,
        result.maintenance,
        result.deficit10,
        result.surplus10,
    ])
}

/// `[bmr, multiplier, maintenance, deficit10, surplus10]`
///
/// `activity_level` may be empty; `activity_multiplier` may be `NaN`.
#[wasm_bindgen]
pub fn total_daily_energy_expenditure(
    sex: &str,
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    activity_level: &str,
    activity_multiplier: f64,
) -> Result<Vec<f64>, JsValue> {
    tdee_breakdown(
        sex,
        weight_kg,
        height_cm,
        age_years,
        activity_level,
        activity_multiplier,
    )
    .map_err(js_error)
}

fn macro_compliance_from_json(actual_json: &str, target_json: &str) -> Result<String, String> {
    let actual: MacroActual =
        serde_json::from_str(actual_json).map_err(|e| format!("Invalid intake: {}", e))?;
    let target: MacroTarget =
        serde_json::from_str(target_json).map_err(|e| format!("Invalid target: {}", e))?;
    serde_json::to_string(&nutrition::macro_compliance(&actual, &target)).map_err(|e| e.to_string())
}

/// Macro compliance ratios as JSON
#[wasm_bindgen]
pub fn macro_compliance(actual_json: &str, target_json: &str) -> Result<String, JsValue> {
    macro_compliance_from_json(actual_json, target_json).map_err(js_error)
}
