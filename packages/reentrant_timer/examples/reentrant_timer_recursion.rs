//! Instrumenting a recursive function: every level enters the same tracking scope but the
//! time is only counted once, between the outermost entry and exit.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that doesn't need production-level safety"
)]

use reentrant_timer::{TimeTracker, TimeSource, WallClock};

fn collatz_steps(tracker: &mut TimeTracker<impl TimeSource>, n: u64) -> u64 {
    let mut tracker = tracker.tracking();

    match n {
        1 => 0,
        n if n % 2 == 0 => 1 + collatz_steps(&mut *tracker, n / 2),
        n => 1 + collatz_steps(&mut *tracker, 3 * n + 1),
    }
}

fn main() {
    let mut tracker = TimeTracker::new(WallClock::new());

    for n in [27, 97, 871] {
        let steps = collatz_steps(&mut tracker, n);
        println!("{n} reaches 1 after {steps} steps; {tracker}");
    }

    assert!(!tracker.active());

    tracker.clear().expect("tracker is not active after all scopes ended");
    println!("after clear: {tracker}");
}
