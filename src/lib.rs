#![doc(test(attr(deny(warnings))))]

//! Troškovnik keeps a single-user household budget (salary, spending
//! categories, line items, and a change log) persisted as one plain-text
//! document and served over a small HTTP gateway.

pub mod chart;
pub mod codec;
pub mod config;
pub mod document;
pub mod errors;
pub mod server;
pub mod services;
pub mod storage;
pub mod tracker;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Troškovnik tracing initialized.");
    });
}
