//! Batch services
//!
//! Services sit between the rows the jobs are fed and the pure calculations
//! in `healthdash_calc`.

pub mod ingest;
pub mod recompute;
pub mod targets;
pub mod trends;

pub use ingest::IngestService;
pub use recompute::RecomputeService;
pub use targets::TargetService;
pub use trends::TrendService;
