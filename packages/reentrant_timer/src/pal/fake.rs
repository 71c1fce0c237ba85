//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Platform;

/// Internal state for the fake platform that can be shared between clones.
#[derive(Debug)]
struct FakePlatformState {
    process_time: Duration,
    thread_time: Duration,
    wall_time: Duration,

    // If set, the next process time reading panics instead of returning a value.
    process_time_panics: bool,
}

/// Fake implementation of the platform abstraction for testing.
///
/// This implementation allows tests to control the clock values
/// instead of relying on actual system calls. Multiple clones of the same
/// `FakePlatform` share the same underlying time state, allowing tests to
/// modify time values after platform creation to simulate time progression.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    state: Arc<Mutex<FakePlatformState>>,
}

impl FakePlatform {
    /// Creates a new fake platform with zero time values.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakePlatformState {
                process_time: Duration::ZERO,
                thread_time: Duration::ZERO,
                wall_time: Duration::ZERO,
                process_time_panics: false,
            })),
        }
    }

    /// Sets the process processor time value.
    ///
    /// This affects all clones of this platform, allowing tests to simulate
    /// time progression during measurement.
    pub(crate) fn set_process_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_time = time;
    }

    /// Sets the thread processor time value.
    pub(crate) fn set_thread_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .thread_time = time;
    }

    /// Sets the wall clock time value.
    pub(crate) fn set_wall_time(&self, time: Duration) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_time = time;
    }

    /// Makes every following process time reading panic, simulating a broken clock.
    pub(crate) fn break_process_time(&self) {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .process_time_panics = true;
    }
}

impl Platform for FakePlatform {
    fn process_time(&self) -> Duration {
        let (time, panics) = {
            let state = self
                .state
                .lock()
                .expect("FakePlatform state lock should not be poisoned");
            (state.process_time, state.process_time_panics)
        };

        // The lock is released first so a simulated failure does not poison it.
        assert!(!panics, "simulated process time failure");

        time
    }

    fn thread_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .thread_time
    }

    fn wall_time(&self) -> Duration {
        self.state
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
            .wall_time
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_time() {
        let platform = FakePlatform::new();
        assert_eq!(platform.process_time(), Duration::ZERO);
        assert_eq!(platform.thread_time(), Duration::ZERO);
        assert_eq!(platform.wall_time(), Duration::ZERO);
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        // Setting time on one clone affects the other
        platform1.set_process_time(Duration::from_millis(100));
        assert_eq!(platform2.process_time(), Duration::from_millis(100));

        platform2.set_wall_time(Duration::from_millis(200));
        assert_eq!(platform1.wall_time(), Duration::from_millis(200));
    }

    #[test]
    #[should_panic(expected = "simulated process time failure")]
    fn broken_process_time_panics() {
        let platform = FakePlatform::new();
        platform.break_process_time();

        _ = platform.process_time();
    }

    #[test]
    fn broken_process_time_leaves_other_clocks_working() {
        let platform = FakePlatform::new();
        platform.set_wall_time(Duration::from_secs(1));
        platform.break_process_time();

        assert_eq!(platform.wall_time(), Duration::from_secs(1));
    }
}
