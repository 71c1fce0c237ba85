//! Basic usage of `Timer`: one tracked region that sleeps and then burns processor time.
//!
//! Sleeping is visible as wall clock time only, busy work as both.

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use reentrant_timer::Timer;

fn busy_wait(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        black_box(());
    }
}

fn main() {
    let mut timer = Timer::new();
    println!("{timer}");

    {
        let timer = timer.tracking();
        assert!(timer.active());
        println!("{}", *timer);

        thread::sleep(Duration::from_millis(500));
        println!("{}", *timer);

        busy_wait(Duration::from_millis(500));
    }

    assert!(!timer.active());
    println!("{timer}");
}
