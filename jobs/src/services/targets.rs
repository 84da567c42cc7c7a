//! Calorie targets for the goals screen

use crate::error::JobError;
use crate::models::{AthleteProfile, EnergyTargets};
use healthdash_calc::tdee::{total_daily_energy_expenditure, TdeeInput};
use healthdash_calc::validation::{
    validate_age_years, validate_height_cm, validate_weight, ValidationError,
};
use tracing::debug;

/// Energy target service
pub struct TargetService;

impl TargetService {
    /// Compute maintenance, deficit and surplus calories for a profile
    ///
    /// Rejects profiles whose anthropometrics are implausible instead of
    /// producing a meaningless (possibly negative) BMR.
    pub fn energy_targets(profile: &AthleteProfile) -> Result<EnergyTargets, JobError> {
        Self::validate_profile(profile)?;

        let tdee = total_daily_energy_expenditure(&TdeeInput {
            sex: profile.sex,
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
            age_years: profile.age_years,
            activity_level: profile.activity_level,
            activity_multiplier: profile.activity_multiplier,
        });

        debug!(
            user_id = %profile.user_id,
            bmr = tdee.bmr,
            multiplier = tdee.multiplier,
            "Computed energy targets"
        );

        Ok(EnergyTargets {
            user_id: profile.user_id,
            tdee,
        })
    }

    fn validate_profile(profile: &AthleteProfile) -> Result<(), ValidationError> {
        let checks: [(&str, f64, fn(f64) -> Result<(), String>); 3] = [
            ("weight_kg", profile.weight_kg, validate_weight),
            ("height_cm", profile.height_cm, validate_height_cm),
            ("age_years", profile.age_years, validate_age_years),
        ];

        for (field, value, check) in checks {
            check(value).map_err(|message| ValidationError::new(field, &message))?;
        }
        Ok(())
    }
}
