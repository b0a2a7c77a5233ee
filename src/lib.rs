#![doc(test(attr(deny(warnings))))]

//! Trip Core is the settlement engine behind shared travel expense tracking:
//! per-member balances, minimal settle-up plans, and naive spend forecasts,
//! all computed as pure functions over an immutable data snapshot supplied by
//! the UI and storage layers.

pub mod core;
pub mod domain;
pub mod errors;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("trip_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Trip Core tracing initialized.");
    });
}
