//! Plausibility checks for device readings and athlete profiles
//!
//! The calculation functions accept any number and degrade gracefully, so
//! these checks live at the edge: callers use them to discard implausible
//! readings (sensor glitches, unit mix-ups) before they reach a baseline.

/// Validate a heart rate reading (bpm)
pub fn validate_heart_rate(bpm: f64) -> Result<(), String> {
    if !bpm.is_finite() {
        return Err("Heart rate must be a valid number".to_string());
    }
    if bpm < 20.0 {
        return Err("Heart rate too low".to_string());
    }
    if bpm > 300.0 {
        return Err("Heart rate too high".to_string());
    }
    Ok(())
}

/// Validate an HRV rMSSD reading (ms)
pub fn validate_hrv(rmssd_ms: f64) -> Result<(), String> {
    if !rmssd_ms.is_finite() {
        return Err("HRV must be a valid number".to_string());
    }
    if rmssd_ms <= 0.0 {
        return Err("HRV must be positive".to_string());
    }
    if rmssd_ms > 300.0 {
        return Err("HRV must be at most 300 ms".to_string());
    }
    Ok(())
}

/// Validate total sleep for one night (minutes)
pub fn validate_sleep_minutes(minutes: f64) -> Result<(), String> {
    if !minutes.is_finite() {
        return Err("Sleep duration must be a valid number".to_string());
    }
    if minutes < 0.0 {
        return Err("Sleep duration cannot be negative".to_string());
    }
    if minutes > 1440.0 {
        // 24 hours
        return Err("Sleep duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        return Err("Percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate a daily training load
pub fn validate_training_load(load: f64) -> Result<(), String> {
    if !load.is_finite() {
        return Err("Training load must be a valid number".to_string());
    }
    if load < 0.0 {
        return Err("Training load cannot be negative".to_string());
    }
    if load > 2000.0 {
        return Err("Training load unreasonably high".to_string());
    }
    Ok(())
}

// ============================================================================
// Profile Validation
// ============================================================================

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if !weight_kg.is_finite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if !height_cm.is_finite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age (in years)
pub fn validate_age_years(age_years: f64) -> Result<(), String> {
    if !age_years.is_finite() {
        return Err("Age must be a valid number".to_string());
    }
    if age_years < 1.0 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 120.0 {
        return Err("Age cannot exceed 120 years".to_string());
    }
    Ok(())
}

/// Keep a reading only if it passes `check`
pub fn plausible(value: Option<f64>, check: fn(f64) -> Result<(), String>) -> Option<f64> {
    value.filter(|v| check(*v).is_ok())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight_kg" => "Current Weight",
        "height_cm" => "Height",
        "age_years" => "Age",
        "resting_hr" => "Resting Heart Rate",
        "max_hr" => "Max Heart Rate",
        "hrv_rmssd" => "Heart Rate Variability",
        "sleep_minutes_total" => "Sleep Duration",
        "sleep_efficiency" => "Sleep Efficiency",
        "training_load" => "Training Load",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
