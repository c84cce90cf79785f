//! Declarative timer configuration.
//!
//! Instead of scattering register bit writes through the init routine,
//! the prescaler/compare selection lives in a [`TimerConfig`] value
//! that is validated against the declared clock frequency before any
//! hardware is touched. The 1 ms contract,
//!
//! ```text
//! (compare + 1) * prescaler / clock_hz == 1 ms
//! ```
//!
//! is the single most important property of the whole library: a
//! configuration that silently misses it produces wrong timing with no
//! runtime symptom. Validation makes the mistake loud at init time and
//! lets the contract be asserted in host-side tests.

use crate::{ConfigError, ConfigResult};

/// Clock prescaler selection for an 8-bit timer.
///
/// The five divisors an AVR Timer0 clock select supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    /// Timer runs at the full CPU clock
    Direct,
    /// CPU clock / 8
    Div8,
    /// CPU clock / 64
    Div64,
    /// CPU clock / 256
    Div256,
    /// CPU clock / 1024
    Div1024,
}

impl Prescaler {
    /// All selectable prescalers, smallest divisor first
    pub const ALL: [Prescaler; 5] = [
        Prescaler::Direct,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    /// The division factor applied to the CPU clock
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prescaler {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "/{}", self.divisor());
    }
}

/// Timer settings that together fix the interrupt period at 1 ms.
///
/// The default is the canonical 16 MHz setup: prescaler 64 gives a
/// 250 kHz timer clock (4 us per count), and a compare value of 249
/// makes the counter reset every 250 counts, i.e. exactly 1 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Assumed CPU clock frequency in Hz
    pub clock_hz: u32,
    /// Timer clock prescaler
    pub prescaler: Prescaler,
    /// Compare-match value; the counter counts `compare + 1` states
    pub compare: u8,
}

impl TimerConfig {
    /// The 16 MHz / prescaler 64 / compare 249 default
    pub const DEFAULT: Self = Self {
        clock_hz: 16_000_000,
        prescaler: Prescaler::Div64,
        compare: 249,
    };

    /// Create a configuration from explicit parts
    pub const fn new(clock_hz: u32, prescaler: Prescaler, compare: u8) -> Self {
        Self {
            clock_hz,
            prescaler,
            compare,
        }
    }

    /// Check that this configuration yields an exact 1 ms interrupt
    /// period for its declared clock frequency.
    pub fn validate(&self) -> ConfigResult<()> {
        // Cycles between interrupts, times 1000, must equal clock_hz.
        // Max is 256 * 1024 * 1000, comfortably inside u32.
        let cycles = (self.compare as u32 + 1) * self.prescaler.divisor();
        if cycles * 1000 == self.clock_hz {
            Ok(())
        } else {
            Err(ConfigError::InexactPeriod)
        }
    }

    /// Derive a 1 ms configuration for a given clock frequency.
    ///
    /// Picks the smallest prescaler whose compare value both divides
    /// out exactly and fits the 8-bit counter. Clocks that cannot hit
    /// 1 ms exactly are rejected rather than rounded.
    pub fn for_clock(clock_hz: u32) -> ConfigResult<Self> {
        let mut exact_divisor_seen = false;
        for prescaler in Prescaler::ALL {
            let cycles_per_ms = prescaler.divisor() * 1000;
            if clock_hz % cycles_per_ms != 0 {
                continue;
            }
            exact_divisor_seen = true;
            let counts = clock_hz / cycles_per_ms;
            if counts == 0 || counts > 256 {
                continue;
            }
            return Ok(Self {
                clock_hz,
                prescaler,
                compare: (counts - 1) as u8,
            });
        }
        if exact_divisor_seen {
            Err(ConfigError::CompareOutOfRange)
        } else {
            Err(ConfigError::InexactPeriod)
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{}Hz {} compare:{}",
            self.clock_hz,
            self.prescaler,
            self.compare
        );
    }
}
