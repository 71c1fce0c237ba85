//! Reentrant tracking of elapsed time using a single time source.

use std::fmt;
use std::num::NonZero;
use std::ops::{Deref, DerefMut};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::{Error, Result, TimeSource};

/// Accumulates the time elapsed on one clock across any number of tracking cycles.
///
/// Tracking is reentrant: [`start()`][Self::start] may be called again while the tracker is
/// already active, and the tracker only becomes inactive once every `start()` has been matched
/// by a [`stop()`][Self::stop]. Only the outermost pair of calls takes readings from the clock,
/// so nested regions are never counted twice.
///
/// The elapsed time can be queried at any moment, including while tracking is active, in which
/// case the time of the currently open cycle is included.
///
/// # Examples
///
/// ```
/// use reentrant_timer::{TimeTracker, WallClock};
///
/// let mut tracker = TimeTracker::new(WallClock::new());
///
/// {
///     let mut outer = tracker.tracking();
///     assert_eq!(outer.depth(), 1);
///
///     {
///         // Nested region, e.g. a recursive call of an instrumented function.
///         let inner = outer.tracking();
///         assert_eq!(inner.depth(), 2);
///     }
///
///     assert!(outer.active());
/// }
///
/// assert!(!tracker.active());
/// println!("{tracker}");
/// ```
pub struct TimeTracker<S: TimeSource> {
    source: S,

    // Time from all completed cycles. Never includes the currently open cycle.
    accumulated: Duration,

    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Inactive,
    Active {
        // Number of unmatched `start()` calls.
        depth: NonZero<usize>,

        // Clock reading taken when the depth went from 0 to 1.
        cycle_start: Duration,
    },
}

impl<S: TimeSource> TimeTracker<S> {
    /// Creates an inactive tracker with no accumulated time that reads the given clock.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            accumulated: Duration::ZERO,
            state: State::Inactive,
        }
    }

    /// The clock this tracker reads.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether there is at least one `start()` that has not yet been matched by a `stop()`.
    #[must_use]
    pub fn active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// The number of `start()` calls not yet matched by a `stop()`. Zero if inactive.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self.state {
            State::Inactive => 0,
            State::Active { depth, .. } => depth.get(),
        }
    }

    /// The total time elapsed so far.
    ///
    /// If the tracker is active, this includes the time since the currently open cycle started.
    /// Querying does not change the state of the tracker.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.state {
            State::Inactive => self.accumulated,
            State::Active { cycle_start, .. } => {
                let open_cycle = self.source.now().saturating_sub(cycle_start);

                self.accumulated.checked_add(open_cycle).expect(
                    "elapsed time overflows Duration - this indicates an unrealistic scenario",
                )
            }
        }
    }

    /// Starts tracking, or increases the reentrancy depth if tracking is already active.
    ///
    /// The clock is only read when the tracker goes from inactive to active.
    pub fn start(&mut self) {
        self.state = match self.state {
            State::Inactive => {
                let cycle_start = self.source.now();

                trace!(source = self.source.name(), "time tracking cycle started");

                State::Active {
                    depth: NonZero::<usize>::MIN,
                    cycle_start,
                }
            }
            State::Active { depth, cycle_start } => State::Active {
                depth: depth.checked_add(1).expect(
                    "tracking depth overflows usize - this indicates an unrealistic scenario",
                ),
                cycle_start,
            },
        };
    }

    /// Decreases the reentrancy depth, completing the current cycle if it reaches zero.
    ///
    /// When the cycle completes, its duration is added to the accumulated time.
    ///
    /// Stopping a tracker that is not active has no effect.
    pub fn stop(&mut self) {
        let State::Active { depth, cycle_start } = self.state else {
            debug!(
                source = self.source.name(),
                "ignoring stop() of inactive time tracker"
            );
            return;
        };

        let remaining = depth
            .get()
            .checked_sub(1)
            .expect("guarded by NonZero depth");

        if let Some(depth) = NonZero::new(remaining) {
            self.state = State::Active { depth, cycle_start };
            return;
        }

        let cycle = self.source.now().saturating_sub(cycle_start);

        self.accumulated = self.accumulated.checked_add(cycle).expect(
            "time accumulation overflows Duration - this indicates an unrealistic scenario",
        );
        self.state = State::Inactive;

        trace!(
            source = self.source.name(),
            ?cycle,
            "time tracking cycle completed"
        );
    }

    /// Resets the accumulated time to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the tracker is active. The tracker is left unchanged.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_inactive()?;
        self.accumulated = Duration::ZERO;
        Ok(())
    }

    /// Resets the accumulated time to zero. Same as [`clear()`][Self::clear].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the tracker is active. The tracker is left unchanged.
    pub fn reset(&mut self) -> Result<()> {
        self.clear()
    }

    /// Starts tracking and returns a guard that stops tracking when dropped.
    ///
    /// The guard stops tracking on every exit path out of the scope that owns it: normal
    /// completion, early return, `?` propagation and panic unwinding. The guard dereferences to
    /// the tracker, so the tracker can be queried (or tracked again, reentrantly) through it.
    ///
    /// # Examples
    ///
    /// ```
    /// use reentrant_timer::{ProcessClock, TimeTracker};
    ///
    /// let mut tracker = TimeTracker::new(ProcessClock::new());
    ///
    /// {
    ///     let guard = tracker.tracking();
    ///     assert!(guard.active());
    ///     // Perform some work
    /// }
    ///
    /// assert!(!tracker.active());
    /// ```
    pub fn tracking(&mut self) -> TrackingGuard<'_, S> {
        self.start();
        TrackingGuard { tracker: self }
    }

    /// Tracks time while executing the provided function.
    ///
    /// Tracking is stopped when the function returns or panics.
    pub fn track<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut guard = self.tracking();
        f(&mut guard)
    }

    /// Stops tracking from a destructor of a guard.
    ///
    /// If the thread is already unwinding, a panic of the time source is contained here so
    /// that it does not abort the process. The tracker then remains active, as after any
    /// failed `stop()`.
    pub(crate) fn stop_on_drop(&mut self) {
        if !thread::panicking() {
            self.stop();
            return;
        }

        if catch_unwind(AssertUnwindSafe(|| self.stop())).is_err() {
            warn!(
                source = self.source.name(),
                "time source failed while unwinding; time tracker left active"
            );
        }
    }

    pub(crate) fn ensure_inactive(&self) -> Result<()> {
        match self.state {
            State::Inactive => Ok(()),
            State::Active { depth, .. } => {
                debug!(
                    source = self.source.name(),
                    depth = depth.get(),
                    "rejecting clear of active time tracker"
                );

                Err(Error::InvalidState { depth: depth.get() })
            }
        }
    }
}

impl<S: TimeSource> fmt::Debug for TimeTracker<S> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeTracker")
            .field("source", &self.source.name())
            .field("accumulated", &self.accumulated)
            .field("state", &self.state)
            .finish()
    }
}

impl<S: TimeSource> fmt::Display for TimeTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeTracker({}: {:?} [{}])",
            self.source.name(),
            self.elapsed(),
            self.depth()
        )
    }
}

/// Keeps a [`TimeTracker`] active for as long as the guard exists.
///
/// Created by [`TimeTracker::tracking()`].
#[must_use = "Tracking stops when the guard is dropped"]
pub struct TrackingGuard<'a, S: TimeSource> {
    tracker: &'a mut TimeTracker<S>,
}

impl<S: TimeSource> Deref for TrackingGuard<'_, S> {
    type Target = TimeTracker<S>;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl<S: TimeSource> DerefMut for TrackingGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl<S: TimeSource> Drop for TrackingGuard<'_, S> {
    fn drop(&mut self) {
        self.tracker.stop_on_drop();
    }
}

impl<S: TimeSource> fmt::Debug for TrackingGuard<'_, S> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingGuard")
            .field("tracker", &self.tracker)
            .finish()
    }
}
