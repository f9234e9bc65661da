#![doc(test(attr(deny(warnings))))]

//! ZenBudget keeps a household's transactions, monthly budgets, and
//! savings goals in one JSON-backed book, served through an interactive
//! shell with import, reporting, and advisory helpers on top.

pub mod advisor;
pub mod categories;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod report;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        core::utils::init_tracing();
        tracing::info!("ZenBudget tracing initialized.");
    });
}
