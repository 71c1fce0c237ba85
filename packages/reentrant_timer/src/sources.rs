//! Time sources that a [`TimeTracker`][crate::TimeTracker] can read.

use std::time::Duration;

use crate::pal::{Platform, PlatformFacade};

/// A source of timestamps for a [`TimeTracker`][crate::TimeTracker].
///
/// Each call to [`now()`][Self::now] returns the offset of the current moment from an origin
/// that is fixed for the lifetime of the source. Readings are expected to be monotonically
/// nondecreasing; only differences between readings are ever used.
///
/// Any `Fn() -> Duration` is a time source, which makes it easy to plug in a custom clock:
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use reentrant_timer::TimeTracker;
///
/// let origin = Instant::now();
/// let mut tracker = TimeTracker::new(move || origin.elapsed());
///
/// tracker.start();
/// tracker.stop();
///
/// assert!(tracker.elapsed() < Duration::from_secs(60));
/// ```
pub trait TimeSource {
    /// Reads the current timestamp.
    fn now(&self) -> Duration;

    /// A short human-readable name of the clock, used when rendering trackers.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> TimeSource for F
where
    F: Fn() -> Duration,
{
    fn now(&self) -> Duration {
        self()
    }
}

/// Reads the processor time consumed by the entire process (all threads).
///
/// Time the process spends suspended or waiting is not counted.
#[derive(Clone, Debug)]
pub struct ProcessClock {
    platform: PlatformFacade,
}

impl ProcessClock {
    /// Creates a clock that reads the processor time of the current process.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pal(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn from_pal(platform: PlatformFacade) -> Self {
        Self { platform }
    }
}

impl Default for ProcessClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ProcessClock {
    fn now(&self) -> Duration {
        self.platform.process_time()
    }

    fn name(&self) -> &'static str {
        "process_time"
    }
}

/// Reads the processor time consumed by the thread that reads the clock.
///
/// Readings from different threads are unrelated to each other, so a tracker using this
/// clock must be started and stopped on the same thread to produce meaningful results.
#[derive(Clone, Debug)]
pub struct ThreadClock {
    platform: PlatformFacade,
}

impl ThreadClock {
    /// Creates a clock that reads the processor time of the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pal(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn from_pal(platform: PlatformFacade) -> Self {
        Self { platform }
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ThreadClock {
    fn now(&self) -> Duration {
        self.platform.thread_time()
    }

    fn name(&self) -> &'static str {
        "thread_time"
    }
}

/// Reads real elapsed time, regardless of process scheduling.
///
/// The clock is monotonic: it is not affected by adjustments of the system calendar time.
#[derive(Clone, Debug)]
pub struct WallClock {
    platform: PlatformFacade,
}

impl WallClock {
    /// Creates a clock that reads real elapsed time.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pal(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn from_pal(platform: PlatformFacade) -> Self {
        Self { platform }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn now(&self) -> Duration {
        self.platform.wall_time()
    }

    fn name(&self) -> &'static str {
        "wall_time"
    }
}
