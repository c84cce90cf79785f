//! The millisecond tick counter and its handler entry point.
//!
//! One process-wide counter, one writer. A port (hardware ISR or host
//! ticker thread) calls [`on_tick`] every millisecond; everyone else
//! reads through [`millis`] and computes elapsed time with wrapping
//! subtraction, which stays correct across the ~49.7 day wraparound.

use core::cell::Cell;

use critical_section::Mutex;

/// A 32-bit millisecond counter with interrupt-safe access.
///
/// The backing cell is guarded by a critical section on every access.
/// On targets whose word size is narrower than 32 bits a plain read
/// could be torn by the tick interrupt between byte loads; taking a
/// critical section for the read rules that out. The raw cell is
/// never exposed.
pub struct TickCounter {
    ticks: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter starting at an arbitrary value
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: Mutex::new(Cell::new(ticks)),
        }
    }

    /// Advance the counter by one millisecond.
    ///
    /// Sole-writer contract: only the tick source calls this, exactly
    /// once per tick. Wraps at 2^32.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let cell = self.ticks.borrow(cs);
            cell.set(cell.get().wrapping_add(1));
        });
    }

    /// Read the current tick count as a coherent snapshot
    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Milliseconds elapsed since `previous`, correct across wraparound
    pub fn elapsed_since(&self, previous: u32) -> u32 {
        self.get().wrapping_sub(previous)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide millisecond counter
static SYSTEM_MILLIS: TickCounter = TickCounter::new();

/// Tick handler entry point.
///
/// Ports arrange for this to run once per millisecond (compare-match
/// ISR on hardware, ticker thread on the host). It must stay minimal:
/// a single increment, no calls back into code that waits on the
/// counter.
#[inline]
pub fn on_tick() {
    SYSTEM_MILLIS.tick();
}

/// Milliseconds since the tick source started, modulo 2^32.
///
/// Never compare two readings directly; subtract with wrapping
/// arithmetic instead:
///
/// ```
/// let start = millis_core::millis();
/// let elapsed = millis_core::millis().wrapping_sub(start);
/// assert!(elapsed < 1000);
/// ```
#[inline]
pub fn millis() -> u32 {
    SYSTEM_MILLIS.get()
}

/// Milliseconds elapsed since a previous [`millis`] reading
#[inline]
pub fn elapsed_since(previous: u32) -> u32 {
    SYSTEM_MILLIS.elapsed_since(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = TickCounter::new();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_tick_increments_by_one() {
        let counter = TickCounter::new();
        counter.tick();
        counter.tick();
        counter.tick();
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_read_is_idempotent_without_tick() {
        let counter = TickCounter::starting_at(42);
        let first = counter.get();
        let second = counter.get();
        assert_eq!(first, second);
    }

    #[test]
    fn test_elapsed_across_wraparound() {
        let counter = TickCounter::starting_at(4_294_967_200);
        for _ in 0..146 {
            counter.tick();
        }
        // 96 ticks to wrap, 50 past zero
        assert_eq!(counter.get(), 50);
        assert_eq!(counter.elapsed_since(4_294_967_200), 146);
    }

    #[test]
    fn test_wrapping_subtraction_matches_expected_delta() {
        let previous: u32 = 4_294_967_200;
        let current: u32 = 50;
        assert_eq!(current.wrapping_sub(previous), 146);
    }

    #[test]
    fn test_tick_wraps_at_max() {
        let counter = TickCounter::starting_at(u32::MAX);
        counter.tick();
        assert_eq!(counter.get(), 0);
    }
}
