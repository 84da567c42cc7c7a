//! Energy expenditure calculations
//!
//! Basal metabolic rate via Mifflin-St Jeor, scaled by an activity
//! multiplier into maintenance calories, with ±10% targets for cutting and
//! building phases.

use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
    Other,
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            "other" => Ok(BiologicalSex::Other),
            _ => Err(format!("Unknown biological sex: {}", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Twice-daily training or physical job plus training
    Athlete,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::Athlete => "Twice-daily training or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "athlete" => Ok(ActivityLevel::Athlete),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Anthropometrics and activity needed for TDEE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeInput {
    pub sex: BiologicalSex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Raw multiplier; wins over `activity_level` when positive
    #[serde(default)]
    pub activity_multiplier: Option<f64>,
}

/// TDEE calculation result with breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdeeResult {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: f64,
    /// Activity multiplier used
    pub multiplier: f64,
    /// Calories for maintenance
    pub maintenance: f64,
    /// Maintenance minus 10%
    pub deficit10: f64,
    /// Maintenance plus 10%
    pub surplus10: f64,
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// The equation has no third category; `Other` takes the female offset.
pub fn mifflin_st_jeor(sex: BiologicalSex, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    let offset = match sex {
        BiologicalSex::Male => 5.0,
        BiologicalSex::Female | BiologicalSex::Other => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years + offset
}

/// Pick the activity multiplier: positive override, then level, then sedentary
pub fn resolve_activity_multiplier(
    activity_level: Option<ActivityLevel>,
    activity_multiplier: Option<f64>,
) -> f64 {
    if let Some(multiplier) = activity_multiplier.filter(|m| m.is_finite() && *m > 0.0) {
        return multiplier;
    }
    activity_level.unwrap_or_default().multiplier()
}

/// Calculate complete TDEE result
///
/// TDEE = BMR × Activity Multiplier
pub fn total_daily_energy_expenditure(input: &TdeeInput) -> TdeeResult {
    let bmr = mifflin_st_jeor(input.sex, input.weight_kg, input.height_cm, input.age_years);
    let multiplier = resolve_activity_multiplier(input.activity_level, input.activity_multiplier);
    let maintenance = bmr * multiplier;

    TdeeResult {
        bmr,
        multiplier,
        maintenance,
        deficit10: maintenance * 0.9,
        surplus10: maintenance * 1.1,
    }
}
