//! Activity ingestion
//!
//! Turns imported workouts into per-session and per-day training load.

use crate::models::{ActivityLoad, ActivityRecord, AthleteProfile};
use chrono::NaiveDate;
use healthdash_calc::load::{
    calculate_session_load, LoadSource, SessionLoadInput, TrimpStreamInput, TrimpSummaryInput,
    FEMALE_TRIMP_COEFFICIENT,
};
use healthdash_calc::tdee::BiologicalSex;
use healthdash_calc::validation::{plausible, validate_heart_rate};
use std::collections::BTreeMap;
use tracing::debug;

/// Activity ingestion service
pub struct IngestService;

/// Heart-rate anchors for TRIMP
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeartRateAnchors {
    resting_hr: f64,
    max_hr: f64,
    coefficient: Option<f64>,
}

impl IngestService {
    /// Estimate the training load of one workout
    pub fn session_load(activity: &ActivityRecord, profile: &AthleteProfile) -> ActivityLoad {
        let input = Self::session_input(activity, profile);
        let result = calculate_session_load(&input);

        debug!(
            user_id = %activity.user_id,
            source_id = %activity.source_id,
            load = result.load,
            source = result.source.as_str(),
            "Scored session load"
        );
        metrics::counter!("healthdash_sessions_ingested_total", "source" => result.source.as_str())
            .increment(1);

        ActivityLoad {
            user_id: activity.user_id,
            source_id: activity.source_id.clone(),
            metric_date: activity.start_time.date_naive(),
            load: result.load,
            source: result.source,
        }
    }

    /// Sum session loads per calendar day (UTC)
    ///
    /// Sessions with no usable evidence are left out, so a day with only
    /// unscorable workouts stays absent rather than reading as zero load.
    pub fn daily_loads(
        activities: &[ActivityRecord],
        profile: &AthleteProfile,
    ) -> BTreeMap<NaiveDate, f64> {
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for activity in activities.iter().filter(|a| a.user_id == profile.user_id) {
            let scored = Self::session_load(activity, profile);
            if scored.source == LoadSource::Unknown {
                continue;
            }
            *daily.entry(scored.metric_date).or_insert(0.0) += scored.load;
        }
        daily
    }

    fn session_input(activity: &ActivityRecord, profile: &AthleteProfile) -> SessionLoadInput {
        let anchors = Self::anchors(activity, profile);

        let stream = match (&activity.hr_stream, anchors) {
            (Some(samples), Some(anchors)) if !samples.is_empty() => Some(TrimpStreamInput {
                samples: samples.clone(),
                sampling_interval_seconds: activity.sampling_interval_s,
                resting_hr: anchors.resting_hr,
                max_hr: anchors.max_hr,
                coefficient: anchors.coefficient,
            }),
            _ => None,
        };

        let avg_hr = plausible(activity.avg_hr, validate_heart_rate);
        let summary = match (activity.duration_s, avg_hr, anchors) {
            (Some(duration_s), Some(avg_hr), Some(anchors)) => Some(TrimpSummaryInput {
                duration_minutes: duration_s / 60.0,
                avg_hr,
                resting_hr: anchors.resting_hr,
                max_hr: anchors.max_hr,
                coefficient: anchors.coefficient,
            }),
            _ => None,
        };

        SessionLoadInput {
            training_stress_score: activity.tss_est,
            stream,
            summary,
        }
    }

    /// Resting and max HR for TRIMP, or `None` without a resting HR
    ///
    /// Max HR is the profile's measured value, else 220 - age. A session
    /// peak above that raises it. Implausible readings are ignored.
    fn anchors(activity: &ActivityRecord, profile: &AthleteProfile) -> Option<HeartRateAnchors> {
        let resting_hr = plausible(profile.resting_hr, validate_heart_rate)?;
        let athlete_max = plausible(profile.max_hr, validate_heart_rate)
            .unwrap_or(220.0 - profile.age_years);
        let max_hr = match plausible(activity.max_hr, validate_heart_rate) {
            Some(peak) => athlete_max.max(peak),
            None => athlete_max,
        };
        let coefficient = match profile.sex {
            BiologicalSex::Female => Some(FEMALE_TRIMP_COEFFICIENT),
            BiologicalSex::Male | BiologicalSex::Other => None,
        };

        Some(HeartRateAnchors {
            resting_hr,
            max_hr,
            coefficient,
        })
    }
}
