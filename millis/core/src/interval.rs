//! Caller-owned interval records for non-blocking periodic tasks.
//!
//! An [`Interval`] is plain data: a previous timestamp, the last
//! computed delta, and the desired period, one record per independent
//! periodic task. The library never dispatches anything on expiry;
//! the task loop polls [`Interval::is_due`] against the current
//! counter reading and restarts the record itself:
//!
//! ```
//! use millis_core::{Interval, RestartPolicy};
//!
//! let mut heartbeat = Interval::new(500);
//! let mut fired = 0;
//!
//! for now in [100, 499, 500, 750, 1000] {
//!     if heartbeat.is_due(now) {
//!         heartbeat.restart(now, RestartPolicy::FromNow);
//!         fired += 1;
//!     }
//! }
//! assert_eq!(fired, 2); // at 500 and 1000
//! ```
//!
//! All arithmetic is wrapping, so records keep working across the
//! counter's 2^32 wraparound without special cases.

/// How to reset an interval record after it fires.
///
/// Deliberately not defaulted: the right choice depends on the task,
/// so every restart names its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    /// `previous = now`. Scheduling jitter is absorbed; each period is
    /// measured from the moment the task actually ran, so late polls
    /// stretch the average period.
    FromNow,
    /// `previous += interval`. Holds the long-run average period exact
    /// regardless of polling jitter; a task that falls more than one
    /// full interval behind will fire back-to-back to catch up.
    ByInterval,
}

/// Timing record for one periodic task.
///
/// All fields are public and freely settable; the methods are
/// conveniences over the same wrapping arithmetic callers could write
/// by hand, with no hidden invariants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    /// Counter reading when the task last fired
    pub previous: u32,
    /// Elapsed milliseconds computed by the last [`elapsed`](Interval::elapsed) call
    pub delta: u32,
    /// Desired period in milliseconds
    pub interval: u32,
}

impl Interval {
    /// Create a record with the given period, anchored at counter zero
    pub const fn new(interval: u32) -> Self {
        Self {
            previous: 0,
            delta: 0,
            interval,
        }
    }

    /// Create a record anchored at a specific counter reading.
    ///
    /// Use this when the task starts mid-run, so the first firing
    /// happens one full period from `now` rather than immediately.
    pub const fn starting_at(interval: u32, now: u32) -> Self {
        Self {
            previous: now,
            delta: 0,
            interval,
        }
    }

    /// Milliseconds elapsed since the record last fired, given the
    /// current counter reading. Updates `delta`.
    pub fn elapsed(&mut self, now: u32) -> u32 {
        self.delta = now.wrapping_sub(self.previous);
        self.delta
    }

    /// Whether at least one full period has elapsed
    pub fn is_due(&mut self, now: u32) -> bool {
        self.elapsed(now) >= self.interval
    }

    /// Reset the record after firing, under the chosen policy
    pub fn restart(&mut self, now: u32, policy: RestartPolicy) {
        self.previous = match policy {
            RestartPolicy::FromNow => now,
            RestartPolicy::ByInterval => self.previous.wrapping_add(self.interval),
        };
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Interval {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "prev:{} delta:{} every:{}ms",
            self.previous,
            self.delta,
            self.interval
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_exactly_at_interval_boundary() {
        let mut record = Interval::starting_at(500, 1000);
        assert!(!record.is_due(1499));
        assert_eq!(record.delta, 499);
        assert!(record.is_due(1500));
        assert_eq!(record.delta, 500);
    }

    #[test]
    fn test_due_detection_across_wraparound() {
        let mut record = Interval::starting_at(200, 4_294_967_200);
        assert!(!record.is_due(4_294_967_290));
        // 96 ms to wrap + 104 past zero = 200 elapsed
        assert!(record.is_due(104));
        assert_eq!(record.delta, 200);
    }

    #[test]
    fn test_restart_from_now_absorbs_jitter() {
        let mut record = Interval::starting_at(500, 1000);
        // Polled 30 ms late
        assert!(record.is_due(1530));
        record.restart(1530, RestartPolicy::FromNow);
        assert_eq!(record.previous, 1530);
        assert!(!record.is_due(2029));
        assert!(record.is_due(2030));
    }

    #[test]
    fn test_restart_by_interval_holds_average_period() {
        let mut record = Interval::starting_at(500, 1000);
        assert!(record.is_due(1530));
        record.restart(1530, RestartPolicy::ByInterval);
        assert_eq!(record.previous, 1500);
        // Next firing lands on the 2000 grid line despite the late poll
        assert!(!record.is_due(1999));
        assert!(record.is_due(2000));
    }

    #[test]
    fn test_restart_by_interval_wraps() {
        let mut record = Interval::starting_at(500, u32::MAX - 99);
        record.restart(u32::MAX - 99, RestartPolicy::ByInterval);
        assert_eq!(record.previous, 399);
    }

    #[test]
    fn test_fields_are_freely_settable() {
        let mut record = Interval::new(1000);
        record.previous = 7_000;
        record.interval = 250;
        assert!(record.is_due(7_250));
    }

    #[test]
    fn test_zero_interval_is_always_due() {
        let mut record = Interval::new(0);
        assert!(record.is_due(0));
        assert!(record.is_due(123));
    }
}
