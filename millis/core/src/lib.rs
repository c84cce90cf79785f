#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # millis-core
//!
//! Portable core of an interrupt-driven millisecond timing library.
//! A hardware timer (or a host-side ticker thread) invokes [`on_tick`]
//! once per millisecond; everything else is built from wrapping
//! arithmetic over the resulting 32-bit counter.
//!
//! The crate is `no_std` and target-independent. Hardware ports supply
//! the tick source; see the `millis-avr` and `millis-host` crates.

use core::fmt;

pub mod config;
pub mod delay;
pub mod interval;
pub mod tick;

pub use config::{Prescaler, TimerConfig};
pub use delay::Delay;
pub use interval::{Interval, RestartPolicy};
pub use tick::{elapsed_since, millis, on_tick, TickCounter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for timer configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from validating a timer configuration
///
/// These surface at initialization time only. A configuration that
/// validates cleanly cannot fail later; a wrong `clock_hz` assumption
/// that happens to validate produces a silently wrong tick period,
/// which no runtime check can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The clock/prescaler/compare combination does not yield exactly 1 ms
    InexactPeriod,
    /// No compare value in the 8-bit counter range reaches a 1 ms period
    CompareOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InexactPeriod => {
                write!(f, "configuration does not produce an exact 1 ms period")
            }
            ConfigError::CompareOutOfRange => {
                write!(f, "no 8-bit compare value reaches a 1 ms period")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::InexactPeriod => defmt::write!(fmt, "InexactPeriod"),
            ConfigError::CompareOutOfRange => defmt::write!(fmt, "CompareOutOfRange"),
        }
    }
}
