//! Real platform implementation using system calls.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use cpu_time::{ProcessTime, ThreadTime};

use crate::pal::abstractions::Platform;

/// All wall clock readings are relative to this, captured on first use.
static WALL_CLOCK_ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Real implementation of the platform abstraction using the `cpu_time` crate for processor
/// time and the standard library monotonic clock for wall clock time.
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    fn process_time(&self) -> Duration {
        ProcessTime::now().as_duration()
    }

    fn thread_time(&self) -> Duration {
        ThreadTime::now().as_duration()
    }

    fn wall_time(&self) -> Duration {
        WALL_CLOCK_ORIGIN.get_or_init(Instant::now).elapsed()
    }
}
