//! Paired processor time and wall clock time tracking.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::pal::PlatformFacade;
use crate::{ProcessClock, Result, TimeTracker, WallClock};

/// Tracks processor time and wall clock time of the same code regions.
///
/// A timer owns one [`TimeTracker`] per clock and drives both of them with the same sequence
/// of operations, so their reentrancy depths are always equal. The elapsed time of each clock
/// can be queried at any moment through [`cpu()`][Self::cpu] and [`wall()`][Self::wall].
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::time::Duration;
///
/// use reentrant_timer::Timer;
///
/// let mut timer = Timer::new();
///
/// {
///     let timer = timer.tracking();
///     assert!(timer.active());
///
///     // Sleeping consumes wall clock time but (almost) no processor time.
///     thread::sleep(Duration::from_millis(10));
///     println!("{}", *timer);
/// }
///
/// assert!(!timer.active());
/// assert!(timer.wall() >= Duration::from_millis(10));
/// ```
#[derive(Debug)]
pub struct Timer {
    cpu: TimeTracker<ProcessClock>,
    wall: TimeTracker<WallClock>,
}

impl Timer {
    /// Creates an inactive timer that tracks the processor time of the current process and
    /// wall clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_platform(&PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn with_platform(platform: &PlatformFacade) -> Self {
        Self {
            cpu: TimeTracker::new(ProcessClock::from_pal(platform.clone())),
            wall: TimeTracker::new(WallClock::from_pal(platform.clone())),
        }
    }

    /// The processor time elapsed so far, including the currently open cycle (if any).
    #[must_use]
    pub fn cpu(&self) -> Duration {
        self.cpu.elapsed()
    }

    /// The wall clock time elapsed so far, including the currently open cycle (if any).
    #[must_use]
    pub fn wall(&self) -> Duration {
        self.wall.elapsed()
    }

    /// The tracker of processor time.
    #[must_use]
    pub fn cpu_tracker(&self) -> &TimeTracker<ProcessClock> {
        &self.cpu
    }

    /// The tracker of wall clock time.
    #[must_use]
    pub fn wall_tracker(&self) -> &TimeTracker<WallClock> {
        &self.wall
    }

    /// Whether either of the trackers is active.
    #[must_use]
    pub fn active(&self) -> bool {
        self.cpu.active() || self.wall.active()
    }

    /// The number of `start()` calls not yet matched by a `stop()`. Zero if inactive.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.cpu.depth().max(self.wall.depth())
    }

    /// Starts tracking on both clocks, or increases the reentrancy depth if already active.
    pub fn start(&mut self) {
        self.cpu.start();
        self.wall.start();
    }

    /// Decreases the reentrancy depth on both clocks, completing the current cycle if it
    /// reaches zero. Stopping a timer that is not active has no effect.
    pub fn stop(&mut self) {
        self.cpu.stop();
        self.wall.stop();
    }

    /// Resets the accumulated time of both clocks to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`][crate::Error::InvalidState] if the timer is active.
    /// Neither clock is changed in that case.
    pub fn clear(&mut self) -> Result<()> {
        self.cpu.ensure_inactive()?;
        self.wall.ensure_inactive()?;

        self.cpu.clear()?;
        self.wall.clear()
    }

    /// Resets the accumulated time of both clocks to zero. Same as [`clear()`][Self::clear].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`][crate::Error::InvalidState] if the timer is active.
    /// Neither clock is changed in that case.
    pub fn reset(&mut self) -> Result<()> {
        self.clear()
    }

    /// Starts tracking on both clocks and returns a guard that stops both when dropped.
    ///
    /// Both clocks are stopped on every exit path out of the scope that owns the guard,
    /// including panic unwinding. The guard dereferences to the timer.
    ///
    /// # Examples
    ///
    /// ```
    /// use reentrant_timer::Timer;
    ///
    /// fn fibonacci(timer: &mut Timer, n: u64) -> u64 {
    ///     let mut timer = timer.tracking();
    ///
    ///     if n < 2 {
    ///         n
    ///     } else {
    ///         fibonacci(&mut timer, n - 1) + fibonacci(&mut timer, n - 2)
    ///     }
    /// }
    ///
    /// let mut timer = Timer::new();
    /// assert_eq!(fibonacci(&mut timer, 10), 55);
    /// assert!(!timer.active());
    /// ```
    pub fn tracking(&mut self) -> TimerGuard<'_> {
        self.start();
        TimerGuard { timer: self }
    }

    /// Tracks time on both clocks while executing the provided function.
    ///
    /// Tracking is stopped when the function returns or panics.
    pub fn track<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut guard = self.tracking();
        f(&mut guard)
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timer(cpu={:?}, wall={:?}, active={})",
            self.cpu(),
            self.wall(),
            self.active()
        )
    }
}

/// Keeps both clocks of a [`Timer`] active for as long as the guard exists.
///
/// Created by [`Timer::tracking()`].
#[derive(Debug)]
#[must_use = "Tracking stops when the guard is dropped"]
pub struct TimerGuard<'a> {
    timer: &'a mut Timer,
}

impl Deref for TimerGuard<'_> {
    type Target = Timer;

    fn deref(&self) -> &Self::Target {
        self.timer
    }
}

impl DerefMut for TimerGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.timer
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        let Timer { cpu, wall } = &mut *self.timer;

        // The wall clock tracker is stopped even if stopping the processor time tracker panics.
        let wall = scopeguard::guard(wall, |wall| wall.stop_on_drop());
        cpu.stop_on_drop();
        drop(wall);
    }
}
