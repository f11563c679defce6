//! Unified error type for difftherm.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the HMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // UI / Display
    /// A transaction on the display bus failed.
    Display,

    /// The display driver could not be initialised.
    DisplayInit,

    // Generic
    /// Buffer too small for the requested text.
    BufferOverflow,
}

/// Result alias used by every bus-affecting call.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Display => f.write_str("display bus transaction failed"),
            Error::DisplayInit => f.write_str("display initialisation failed"),
            Error::BufferOverflow => f.write_str("text buffer overflow"),
        }
    }
}

// Convenience conversions

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::BufferOverflow
    }
}
