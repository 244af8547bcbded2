// Library surface for the headless core and integration tests.
// Terminal rendering stays in the binary.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod history;
pub mod language;
pub mod logging;
pub mod practice;
pub mod runtime;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod time_control;
pub mod time_series;
pub mod timer;
pub mod typing_policy;
pub mod word_generator;

pub use error::{Error, Result};

/// Cadence of the timer callback
pub const TICK_RATE_MS: u64 = 250;
