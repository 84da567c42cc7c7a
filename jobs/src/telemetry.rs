//! Tracing setup for the job binary

use crate::config::JobsConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout stays clean for job output.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if JobsConfig::is_production() {
            "healthdash_jobs=info".into()
        } else {
            "healthdash_jobs=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if JobsConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
