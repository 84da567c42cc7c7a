//! Health dashboard batch jobs
//!
//! This library exposes the job modules for use in tests and the binary.

pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod telemetry;
