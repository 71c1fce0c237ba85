//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Duration;

/// Provides access to the clocks of the platform.
///
/// Every clock returns the offset of the current moment from a fixed origin that is
/// specific to that clock. Only differences between two readings of the same clock
/// are meaningful.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the processor time consumed by the entire process (all threads).
    fn process_time(&self) -> Duration;

    /// Gets the processor time consumed by the current thread.
    fn thread_time(&self) -> Duration;

    /// Gets the monotonic real time elapsed since a fixed process-wide origin.
    fn wall_time(&self) -> Duration;
}
