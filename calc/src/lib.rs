//! Health Dashboard Calculation Library
//!
//! Deterministic numeric engine behind the dashboard: session training load,
//! daily readiness, energy expenditure, and time-series trend statistics.
//! Everything here is a pure function of its inputs; the batch jobs and the
//! WASM bindings are the only callers.

pub mod load;
pub mod numeric;
pub mod nutrition;
pub mod readiness;
pub mod tdee;
pub mod trends;
pub mod validation;

// Re-export commonly used items
pub use load::*;
pub use nutrition::*;
pub use readiness::*;
pub use tdee::*;
pub use trends::*;
