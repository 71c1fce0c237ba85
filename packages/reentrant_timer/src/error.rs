use thiserror::Error;

/// Errors that can occur when operating a [`TimeTracker`][crate::TimeTracker] or
/// [`Timer`][crate::Timer].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The caller attempted to clear a tracker while it was still tracking time.
    ///
    /// Tracking must be stopped (all `start()` calls matched by `stop()` calls) before
    /// the accumulated time can be cleared.
    #[error("cannot clear time tracker while it is active (depth {depth})")]
    InvalidState {
        /// The reentrancy depth of the tracker at the time of the failed operation.
        depth: usize,
    },
}

/// A specialized `Result` type for time tracking operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;
