//! Session training load module
//!
//! Estimates the physiological load of a single workout from the best
//! evidence available:
//!
//! 1. **TSS**: an externally computed Training Stress Score, taken verbatim
//! 2. **TRIMP from a heart-rate stream**: Banister impulse summed per sample
//! 3. **TRIMP from summary statistics**: one impulse over the whole session
//!
//! Invalid numbers never propagate. Anything that cannot be evaluated
//! contributes zero, and a session with no usable evidence reports
//! [`LoadSource::Unknown`].

use crate::numeric::finite;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Banister exponent for the male response curve, the default
pub const DEFAULT_TRIMP_COEFFICIENT: f64 = 1.92;

/// Banister exponent for the female response curve
pub const FEMALE_TRIMP_COEFFICIENT: f64 = 1.67;

/// Linear weighting factor of the Banister impulse
pub const TRIMP_SCALE: f64 = 0.64;

/// Sampling interval assumed when a stream does not state one
pub const DEFAULT_SAMPLING_INTERVAL_SECONDS: f64 = 5.0;

// ============================================================================
// Input Types
// ============================================================================

/// One heart-rate reading from a device stream
///
/// Devices report either a bare number or an object carrying a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeartRateSample {
    Bpm(f64),
    Sample {
        hr: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<DateTime<Utc>>,
    },
}

impl HeartRateSample {
    /// Heart rate in beats per minute, whichever form the sample took
    pub fn hr(&self) -> f64 {
        match self {
            HeartRateSample::Bpm(hr) => *hr,
            HeartRateSample::Sample { hr, .. } => *hr,
        }
    }
}

impl From<f64> for HeartRateSample {
    fn from(hr: f64) -> Self {
        HeartRateSample::Bpm(hr)
    }
}

/// Session summary used when no stream is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimpSummaryInput {
    pub duration_minutes: f64,
    pub avg_hr: f64,
    pub resting_hr: f64,
    pub max_hr: f64,
    /// Exponent override, e.g. [`FEMALE_TRIMP_COEFFICIENT`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
}

/// Heart-rate stream for per-sample TRIMP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimpStreamInput {
    pub samples: Vec<HeartRateSample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_interval_seconds: Option<f64>,
    pub resting_hr: f64,
    pub max_hr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<f64>,
}

/// All evidence known about one workout
///
/// Precedence when several sources are present: TSS, then stream, then summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionLoadInput {
    #[serde(default)]
    pub training_stress_score: Option<f64>,
    #[serde(default)]
    pub stream: Option<TrimpStreamInput>,
    #[serde(default)]
    pub summary: Option<TrimpSummaryInput>,
}

// ============================================================================
// Result Types
// ============================================================================

/// Which evidence produced a session load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    Tss,
    TrimpStream,
    TrimpSummary,
    /// No usable evidence; load is zero
    Unknown,
}

impl LoadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadSource::Tss => "tss",
            LoadSource::TrimpStream => "trimp_stream",
            LoadSource::TrimpSummary => "trimp_summary",
            LoadSource::Unknown => "unknown",
        }
    }
}

/// Load of one session and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionLoadResult {
    pub load: f64,
    pub source: LoadSource,
}

impl SessionLoadResult {
    fn unknown() -> Self {
        Self {
            load: 0.0,
            source: LoadSource::Unknown,
        }
    }
}

// ============================================================================
// TRIMP Calculations
// ============================================================================

/// Banister impulse for `minutes` spent at heart-rate reserve fraction `intensity`
///
/// TRIMP = minutes × intensity × 0.64 × e^(coefficient × intensity)
fn banister_impulse(minutes: f64, intensity: f64, coefficient: f64) -> f64 {
    minutes * intensity * TRIMP_SCALE * (coefficient * intensity).exp()
}

/// Heart-rate reserve, or `None` when it cannot be used as a divisor
fn heart_rate_reserve(resting_hr: f64, max_hr: f64) -> Option<f64> {
    let reserve = max_hr - resting_hr;
    (reserve.is_finite() && reserve > 0.0).then_some(reserve)
}

fn resolve_coefficient(coefficient: Option<f64>) -> f64 {
    finite(coefficient).unwrap_or(DEFAULT_TRIMP_COEFFICIENT)
}

/// Calculate TRIMP from session summary statistics
///
/// intensity = (avg HR - resting HR) / (max HR - resting HR)
pub fn calculate_trimp_from_summary(input: &TrimpSummaryInput) -> f64 {
    let duration = input.duration_minutes;
    if !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }

    let Some(reserve) = heart_rate_reserve(input.resting_hr, input.max_hr) else {
        return 0.0;
    };

    let intensity = (input.avg_hr - input.resting_hr) / reserve;
    if !intensity.is_finite() || intensity <= 0.0 {
        return 0.0;
    }

    let load = banister_impulse(duration, intensity, resolve_coefficient(input.coefficient));
    if load.is_finite() {
        load
    } else {
        0.0
    }
}

/// Calculate TRIMP by summing the impulse of every stream sample
///
/// Each sample stands for one sampling interval. Samples at or below resting
/// heart rate, or with a non-finite reading, contribute nothing.
pub fn calculate_trimp_from_stream(input: &TrimpStreamInput) -> f64 {
    if input.samples.is_empty() {
        return 0.0;
    }

    let interval_seconds = input
        .sampling_interval_seconds
        .unwrap_or(DEFAULT_SAMPLING_INTERVAL_SECONDS);
    let interval_minutes = interval_seconds / 60.0;
    if !interval_minutes.is_finite() || interval_minutes <= 0.0 {
        return 0.0;
    }

    let Some(reserve) = heart_rate_reserve(input.resting_hr, input.max_hr) else {
        return 0.0;
    };
    let coefficient = resolve_coefficient(input.coefficient);

    let load: f64 = input
        .samples
        .iter()
        .map(HeartRateSample::hr)
        .filter(|hr| hr.is_finite())
        .map(|hr| (hr - input.resting_hr) / reserve)
        .filter(|intensity| *intensity > 0.0)
        .map(|intensity| banister_impulse(interval_minutes, intensity, coefficient))
        .filter(|impulse| impulse.is_finite())
        .sum();
    if load.is_finite() {
        load
    } else {
        0.0
    }
}

/// Calculate the load of one session from its best available evidence
pub fn calculate_session_load(input: &SessionLoadInput) -> SessionLoadResult {
    if let Some(tss) = finite(input.training_stress_score).filter(|tss| *tss > 0.0) {
        return SessionLoadResult {
            load: tss,
            source: LoadSource::Tss,
        };
    }

    if let Some(stream) = &input.stream {
        let trimp = calculate_trimp_from_stream(stream);
        if trimp > 0.0 {
            return SessionLoadResult {
                load: trimp,
                source: LoadSource::TrimpStream,
            };
        }
    }

    if let Some(summary) = &input.summary {
        let trimp = calculate_trimp_from_summary(summary);
        if trimp > 0.0 {
            return SessionLoadResult {
                load: trimp,
                source: LoadSource::TrimpSummary,
            };
        }
    }

    SessionLoadResult::unknown()
}
