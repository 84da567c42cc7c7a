//! Job error handling
//!
//! The calculation core never fails; everything here comes from the edges
//! around it: configuration, input files, task scheduling, and profile data
//! too implausible to compute targets from.

use healthdash_calc::validation::ValidationError;
use thiserror::Error;

/// Error type for batch jobs
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<ValidationError> for JobError {
    fn from(err: ValidationError) -> Self {
        JobError::Validation(err.user_message())
    }
}
