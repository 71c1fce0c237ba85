#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Reentrant processor time and wall clock time tracking for instrumenting code regions.
//!
//! This package measures how much time is spent in regions of code that may be entered and
//! exited many times, including nested and recursive entry, accumulating the total across all
//! entries. The elapsed time can be queried at any moment, even while a region is still being
//! tracked.
//!
//! The core functionality includes:
//! - [`TimeTracker`] - Reentrant tracking of elapsed time on a single clock
//! - [`Timer`] - Tracks processor time and wall clock time of the same regions in lockstep
//! - [`TimeSource`] - A clock that a tracker can read, with the built-in [`ProcessClock`],
//!   [`ThreadClock`] and [`WallClock`] implementations
//!
//! # Simple usage
//!
//! ```
//! use reentrant_timer::Timer;
//!
//! let mut timer = Timer::new();
//!
//! {
//!     let _tracking = timer.tracking();
//!     // Perform some work
//!     let mut sum = 0_u64;
//!     for i in 0..10_000 {
//!         sum = sum.wrapping_add(i);
//!     }
//!     std::hint::black_box(sum);
//! }
//!
//! println!("{timer}");
//! ```
//!
//! # Reentrancy
//!
//! Every `start()` must be matched by a `stop()` before tracking ends. Only the outermost pair
//! of calls reads the clock, so overlapping regions are never counted twice:
//!
//! ```
//! use reentrant_timer::{TimeTracker, WallClock};
//!
//! let mut tracker = TimeTracker::new(WallClock::new());
//!
//! tracker.start();
//! tracker.start();
//! tracker.stop();
//! assert!(tracker.active());
//!
//! tracker.stop();
//! assert!(!tracker.active());
//!
//! // Stopping an inactive tracker has no effect.
//! tracker.stop();
//! assert_eq!(tracker.depth(), 0);
//! ```
//!
//! The scoped forms [`TimeTracker::tracking()`] and [`Timer::tracking()`] return guards that
//! stop tracking when dropped, which also happens when the tracked code returns early or panics.
//!
//! # Clearing
//!
//! The accumulated time can only be cleared while tracking is not active. Clearing an active
//! tracker returns [`Error::InvalidState`] and leaves the tracker unchanged.
//!
//! # Threading
//!
//! The tracking types are plain values that can be moved between threads but have no internal
//! synchronization. Reentrancy means sequential nesting within one logical flow of control,
//! not parallel use from multiple threads.
//!
//! # Diagnostics
//!
//! The package emits `tracing` events at the `trace` level when tracking cycles start and
//! complete, and at the `debug` level when a stray `stop()` is ignored or a clear is rejected.

mod error;
mod paired;
mod pal;
mod sources;
mod time_tracker;

pub use error::{Error, Result};
pub use paired::{Timer, TimerGuard};
pub use sources::{ProcessClock, ThreadClock, TimeSource, WallClock};
pub use time_tracker::{TimeTracker, TrackingGuard};
