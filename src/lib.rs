//! Display front-end of a dual-sensor differential thermostat.
//!
//! The library holds everything that can be tested on the host (no
//! embedded hardware required): temperature and address formatting, the
//! mode state machine, and screen rendering against the [`TextDisplay`]
//! abstraction.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.
//!
//! [`TextDisplay`]: ui::display::TextDisplay

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible in every module.
mod fmt;

pub mod address;
pub mod config;
pub mod error;
pub mod format;
pub mod mode;
pub mod state;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use address::{hex_string, is_zero_address, DeviceAddress};
pub use error::{Error, Result};
pub use format::{format_temp, Precision, TempText};
pub use mode::{Command, Event, Mode, ModeMachine};
pub use state::{is_valid_temp, Readings, ResetSelection, Settings};
pub use ui::Hmi;
