//! Blocking delays built on repeated counter comparison.
//!
//! The core itself never blocks; this is the canonical consumer of the
//! comparison pattern, packaged behind [`embedded_hal::delay::DelayNs`]
//! so driver crates that want a delay provider can use the tick counter
//! directly. Resolution is 1 ms: sub-millisecond requests are rounded
//! up to one full tick.
//!
//! Only valid while a tick source is running; without one the busy
//! wait never completes.

use embedded_hal::delay::DelayNs;

use crate::tick;

/// Millisecond-resolution delay provider over the tick counter
#[derive(Debug, Clone, Copy, Default)]
pub struct Delay;

impl Delay {
    pub const fn new() -> Self {
        Delay
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns.div_ceil(1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us.div_ceil(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        let start = tick::millis();
        while tick::elapsed_since(start) < ms {}
    }
}
