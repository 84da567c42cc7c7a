//! Integration tests for workout ingestion, load trends and energy targets

mod common;

use common::{athlete, date, workout};
use healthdash_calc::load::{HeartRateSample, LoadSource};
use healthdash_calc::tdee::BiologicalSex;
use healthdash_jobs::config::TrendConfig;
use healthdash_jobs::error::JobError;
use healthdash_jobs::models::{ActivityRecord, AthleteProfile};
use healthdash_jobs::services::{IngestService, TargetService, TrendService};

#[test]
fn test_workouts_to_trend() {
    let profile = athlete(BiologicalSex::Male);
    let activities = vec![
        workout(&profile, "2024-04-01T06:30:00Z", 145.0),
        workout(&profile, "2024-04-02T06:30:00Z", 130.0),
        ActivityRecord {
            tss_est: Some(110.0),
            ..workout(&profile, "2024-04-04T06:30:00Z", 150.0)
        },
        workout(&profile, "2024-04-04T17:00:00Z", 120.0),
    ];

    let daily = IngestService::daily_loads(&activities, &profile);
    assert_eq!(daily.len(), 3);
    assert!(daily[&date("2024-04-04")] > 110.0);

    let trend = TrendService::load_trend(
        profile.user_id,
        &daily,
        date("2024-04-01"),
        date("2024-04-07"),
        &TrendConfig::default(),
    );

    assert_eq!(trend.dates.len(), 7);
    assert_eq!(trend.daily_load[2], None);
    assert_eq!(trend.daily_load[4], None);
    assert_eq!(trend.balance.tsb, trend.balance.ctl - trend.balance.atl);
    // Acute load reacts faster to the recent block than chronic load
    assert!(trend.balance.atl > trend.balance.ctl);
    assert!(trend.balance.tsb < 0.0);
}

#[test]
fn test_harder_session_carries_more_load() {
    let profile = athlete(BiologicalSex::Female);
    let easy = IngestService::session_load(&workout(&profile, "2024-04-01T06:30:00Z", 120.0), &profile);
    let hard = IngestService::session_load(&workout(&profile, "2024-04-01T06:30:00Z", 165.0), &profile);

    assert_eq!(easy.source, LoadSource::TrimpSummary);
    assert!(hard.load > easy.load);
}

#[test]
fn test_stream_and_summary_agree_on_constant_effort() {
    let profile = athlete(BiologicalSex::Male);
    let summary = workout(&profile, "2024-04-01T06:30:00Z", 140.0);
    let streamed = ActivityRecord {
        hr_stream: Some(vec![HeartRateSample::Bpm(140.0); 720]),
        sampling_interval_s: Some(5.0),
        ..summary.clone()
    };

    let from_summary = IngestService::session_load(&summary, &profile);
    let from_stream = IngestService::session_load(&streamed, &profile);

    assert_eq!(from_stream.source, LoadSource::TrimpStream);
    assert!((from_stream.load - from_summary.load).abs() < 1e-6);
}

#[test]
fn test_workout_json_accepts_mixed_stream_samples() {
    let profile = athlete(BiologicalSex::Male);
    let json = format!(
        r#"{{
            "user_id": "{}",
            "source_id": "strava-991",
            "start_time": "2024-04-01T06:30:00Z",
            "hr_stream": [130, {{"hr": 150, "timestamp": "2024-04-01T06:30:05Z"}}, 145.5]
        }}"#,
        profile.user_id
    );

    let record: ActivityRecord = serde_json::from_str(&json).unwrap();
    let scored = IngestService::session_load(&record, &profile);

    assert_eq!(scored.source, LoadSource::TrimpStream);
    assert!(scored.load > 0.0);
}

#[test]
fn test_energy_targets_for_profile() {
    let profile = AthleteProfile {
        weight_kg: 80.0,
        height_cm: 180.0,
        age_years: 35.0,
        ..athlete(BiologicalSex::Male)
    };

    let targets = TargetService::energy_targets(&profile).unwrap();
    assert!((targets.tdee.bmr - 1755.0).abs() < 1.0);
    assert_eq!(targets.tdee.multiplier, 1.725);
    assert!((targets.tdee.maintenance - 1755.0 * 1.725).abs() < 1.0);
}

#[test]
fn test_energy_targets_reject_implausible_height() {
    let profile = AthleteProfile {
        height_cm: 1.8,
        ..athlete(BiologicalSex::Male)
    };

    let err = TargetService::energy_targets(&profile).unwrap_err();
    assert!(matches!(err, JobError::Validation(_)));
}

#[test]
fn test_unscorable_workout_leaves_trend_gap() {
    let profile = AthleteProfile {
        resting_hr: None,
        ..athlete(BiologicalSex::Male)
    };
    let activities = vec![
        ActivityRecord {
            tss_est: Some(110.0),
            ..workout(&profile, "2024-04-01T06:30:00Z", 150.0)
        },
        workout(&profile, "2024-04-02T06:30:00Z", 140.0),
    ];

    let daily = IngestService::daily_loads(&activities, &profile);
    assert!(!daily.contains_key(&date("2024-04-02")));

    let trend = TrendService::load_trend(
        profile.user_id,
        &daily,
        date("2024-04-01"),
        date("2024-04-02"),
        &TrendConfig::default(),
    );

    assert_eq!(trend.daily_load, vec![Some(110.0), None]);
    assert_eq!(trend.balance.atl_series, vec![110.0, 110.0]);
    assert_eq!(trend.balance.ctl, 110.0);
}
