#![doc(test(attr(deny(warnings))))]

//! FinTrack Core keeps a personal monthly budget: a category tree per month,
//! spend tracked for the user and a partner, and a loader that migrates any
//! older storage shape into the current one.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod migrate;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::{BudgetStore, StoreOptions};
pub use crate::domain::{AppState, BudgetMonthKey};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FinTrack Core tracing initialized.");
    });
}

/// Like [`init`], honouring the config's `log_filter` directive.
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(config.log_filter.as_deref());
        tracing::info!("FinTrack Core tracing initialized.");
    });
}
