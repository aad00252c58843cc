#![doc(test(attr(deny(warnings))))]

//! Tally is a finance organizer: recurring bill expansion, activity feeds over
//! named periods, planning and savings goals, driven from a command shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod services;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}
