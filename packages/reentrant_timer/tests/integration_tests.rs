//! Integration tests for `reentrant_timer` against the real platform.
//!
//! These tests verify that real work and real waiting are visible on the expected clocks.

use std::hint::black_box;
use std::thread;
use std::time::{Duration, Instant};

use reentrant_timer::{Error, ProcessClock, ThreadClock, TimeTracker, Timer};

/// Performs intensive CPU work for at least 50ms of real time.
fn perform_measurable_cpu_work() {
    let start = Instant::now();
    let mut accumulator = 0_u64;

    while start.elapsed() < Duration::from_millis(50) {
        for i in 0..50_000_u32 {
            accumulator = accumulator
                .wrapping_add(u64::from(i))
                .wrapping_mul(3)
                .wrapping_add(7)
                .rotate_left(1);
        }

        black_box(accumulator);
    }
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn real_timer_measures_cpu_work() {
    let mut timer = Timer::new();

    timer.track(|_| perform_measurable_cpu_work());

    assert!(!timer.active());

    // With 50ms+ of intensive work, we must get a non-zero measurement.
    assert!(
        timer.cpu() >= Duration::from_millis(1),
        "Expected measurable processor time for intensive work, but got {:?}",
        timer.cpu()
    );
    assert!(
        timer.wall() >= Duration::from_millis(50),
        "Expected at least 50ms of wall clock time, but got {:?}",
        timer.wall()
    );
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn real_timer_sleep_is_wall_time() {
    let mut timer = Timer::new();

    {
        let timer = timer.tracking();
        assert!(timer.active());

        thread::sleep(Duration::from_millis(50));
    }

    assert!(!timer.active());
    assert!(
        timer.wall() >= Duration::from_millis(50),
        "Expected at least 50ms of wall clock time, but got {:?}",
        timer.wall()
    );
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn real_timer_elapsed_grows_while_active() {
    let mut timer = Timer::new();

    timer.start();

    let first = timer.wall();
    thread::sleep(Duration::from_millis(10));
    let second = timer.wall();

    assert!(second >= first.saturating_add(Duration::from_millis(10)));
    assert!(timer.active());

    timer.stop();

    let stopped = timer.wall();
    thread::sleep(Duration::from_millis(10));

    // Nothing accumulates while inactive.
    assert_eq!(timer.wall(), stopped);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn real_timer_clear_after_tracking() {
    let mut timer = Timer::new();

    timer.track(|timer| {
        assert!(matches!(timer.clear(), Err(Error::InvalidState { depth: 1 })));
        perform_measurable_cpu_work();
    });

    timer.clear().unwrap();

    assert_eq!(timer.cpu(), Duration::ZERO);
    assert_eq!(timer.wall(), Duration::ZERO);
}

#[test]
#[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
fn real_thread_clock_ignores_other_threads() {
    let mut tracker = TimeTracker::new(ThreadClock::new());

    tracker.track(|_| {
        thread::spawn(perform_measurable_cpu_work)
            .join()
            .unwrap();
    });

    let mut process_tracker = TimeTracker::new(ProcessClock::new());

    process_tracker.track(|_| {
        thread::spawn(perform_measurable_cpu_work)
            .join()
            .unwrap();
    });

    assert!(
        tracker.elapsed() < process_tracker.elapsed(),
        "Expected thread time ({:?}) to exclude work done on another thread, unlike process time ({:?})",
        tracker.elapsed(),
        process_tracker.elapsed()
    );
}
