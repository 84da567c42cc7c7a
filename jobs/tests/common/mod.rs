//! Common test utilities for integration tests
//!
//! Fixture builders for daily metric rows, workouts and profiles.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use fake::Fake;
use healthdash_calc::tdee::{ActivityLevel, BiologicalSex};
use healthdash_jobs::models::{ActivityRecord, AthleteProfile, DailyMetric};
use uuid::Uuid;

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

pub fn timestamp(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 literal")
}

/// A steady, well-rested day
pub fn steady_day(user_id: Uuid, metric_date: NaiveDate) -> DailyMetric {
    DailyMetric {
        user_id,
        metric_date,
        sleep_minutes_total: Some(450.0),
        sleep_efficiency: Some(90.0),
        resting_hr: Some(52.0),
        hrv_rmssd: Some(70.0),
        training_load: Some(60.0),
    }
}

/// A random but physiologically plausible day
pub fn plausible_day(user_id: Uuid, metric_date: NaiveDate) -> DailyMetric {
    DailyMetric {
        user_id,
        metric_date,
        sleep_minutes_total: Some((300.0..540.0).fake::<f64>()),
        sleep_efficiency: Some((70.0..98.0).fake::<f64>()),
        resting_hr: Some((42.0..70.0).fake::<f64>()),
        hrv_rmssd: Some((25.0..120.0).fake::<f64>()),
        training_load: Some((0.0..250.0).fake::<f64>()),
    }
}

/// `days` consecutive plausible rows starting at `start`
pub fn plausible_history(user_id: Uuid, start: NaiveDate, days: usize) -> Vec<DailyMetric> {
    start
        .iter_days()
        .take(days)
        .map(|day| plausible_day(user_id, day))
        .collect()
}

/// `days` consecutive steady rows starting at `start`
pub fn steady_history(user_id: Uuid, start: NaiveDate, days: usize) -> Vec<DailyMetric> {
    start
        .iter_days()
        .take(days)
        .map(|day| steady_day(user_id, day))
        .collect()
}

pub fn athlete(sex: BiologicalSex) -> AthleteProfile {
    AthleteProfile {
        user_id: Uuid::new_v4(),
        sex,
        weight_kg: 70.0,
        height_cm: 175.0,
        age_years: 34.0,
        resting_hr: Some(50.0),
        max_hr: Some(188.0),
        activity_level: Some(ActivityLevel::VeryActive),
        activity_multiplier: None,
    }
}

/// A one-hour workout with only summary statistics
pub fn workout(profile: &AthleteProfile, start: &str, avg_hr: f64) -> ActivityRecord {
    ActivityRecord {
        user_id: profile.user_id,
        source_id: format!("import-{}", start),
        start_time: timestamp(start),
        duration_s: Some(3600.0),
        avg_hr: Some(avg_hr),
        max_hr: None,
        tss_est: None,
        hr_stream: None,
        sampling_interval_s: None,
    }
}
