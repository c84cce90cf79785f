//! Blinky demo: the non-blocking interval pattern on the host port.
//!
//! Two simulated LEDs share one tick source, each with its own
//! caller-owned `Interval` record and its own restart policy. Neither
//! ever blocks the loop; both just compare against the counter.

use millis_core::{Interval, RestartPolicy};

fn main() {
    env_logger::init();
    millis_host::start();

    let now = millis_core::millis();
    let mut fast = Interval::starting_at(250, now);
    let mut slow = Interval::starting_at(400, now);
    let mut fast_on = false;
    let mut slow_on = false;

    let start = millis_core::millis();
    while millis_core::elapsed_since(start) < 2_000 {
        let now = millis_core::millis();

        if fast.is_due(now) {
            // Measured from when we actually toggled
            fast.restart(now, RestartPolicy::FromNow);
            fast_on = !fast_on;
            println!("[{now:>5} ms] fast led {}", if fast_on { "on" } else { "off" });
        }

        if slow.is_due(now) {
            // Held to the 400 ms grid regardless of polling jitter
            slow.restart(now, RestartPolicy::ByInterval);
            slow_on = !slow_on;
            println!("[{now:>5} ms] slow led {}", if slow_on { "on" } else { "off" });
        }

        std::thread::yield_now();
    }

    millis_host::stop();
}
